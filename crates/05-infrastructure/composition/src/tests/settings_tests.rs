//! 注册表配置测试

use crate::builder::LoggingConfig;
use crate::settings::RegistrySettings;
use infrastructure_common::{ConfigError, Lifetime, DEFAULT_MAX_RESOLUTION_DEPTH};
use std::io::Write;
use tempfile::NamedTempFile;

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// 测试空配置使用默认值
#[test]
fn test_empty_toml_uses_defaults() {
    let settings = RegistrySettings::from_toml_str("").unwrap();
    assert_eq!(settings, RegistrySettings::default());
    assert_eq!(settings.container.default_lifetime, Lifetime::Singleton);
    assert_eq!(settings.container.max_resolution_depth, DEFAULT_MAX_RESOLUTION_DEPTH);
    assert_eq!(settings.logging, LoggingConfig::default());
}

/// 测试从 TOML 文件加载
#[test]
fn test_load_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[container]
default_lifetime = "transient"
max_resolution_depth = 16

[logging]
level = "debug"
json_format = true
"#
    )
    .unwrap();

    let settings = RegistrySettings::from_toml_file(file.path()).unwrap();
    assert_eq!(settings.container.default_lifetime, Lifetime::Transient);
    assert_eq!(settings.container.max_resolution_depth, 16);
    assert_eq!(settings.logging.level, "debug");
    assert!(settings.logging.json_format);
    assert!(settings.logging.show_target);
}

/// 测试文件不存在
#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = RegistrySettings::from_toml_file(dir.path().join("missing.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}

/// 测试无效的 TOML
#[test]
fn test_invalid_toml_is_a_parse_error() {
    let result = RegistrySettings::from_toml_str("[container]\ndefault_lifetime = \"forever\"");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// 测试环境变量覆盖
#[test]
fn test_overrides_apply_on_top_of_file_values() {
    let settings = RegistrySettings::default()
        .with_overrides(
            "REGISTRY",
            vars(&[
                ("REGISTRY_DEFAULT_LIFETIME", "transient"),
                ("REGISTRY_MAX_RESOLUTION_DEPTH", "8"),
                ("REGISTRY_LOG_LEVEL", "warn"),
                ("REGISTRY_UNKNOWN", "ignored"),
                ("OTHER_LOG_LEVEL", "trace"),
            ]),
        )
        .unwrap();

    assert_eq!(settings.container.default_lifetime, Lifetime::Transient);
    assert_eq!(settings.container.max_resolution_depth, 8);
    assert_eq!(settings.logging.level, "warn");
}

/// 测试无效的环境变量值
#[test]
fn test_invalid_override_values_are_rejected() {
    let depth = RegistrySettings::default()
        .with_overrides("REGISTRY", vars(&[("REGISTRY_MAX_RESOLUTION_DEPTH", "deep")]));
    assert!(matches!(depth, Err(ConfigError::ValidationError { .. })));

    let lifetime = RegistrySettings::default()
        .with_overrides("REGISTRY", vars(&[("REGISTRY_DEFAULT_LIFETIME", "forever")]));
    assert!(matches!(lifetime, Err(ConfigError::ValidationError { .. })));
}

/// 测试进程环境变量
#[test]
fn test_process_environment_overrides() {
    std::env::set_var("SETTINGS_TEST_MAX_RESOLUTION_DEPTH", "12");
    let settings = RegistrySettings::default()
        .with_env_overrides("SETTINGS_TEST")
        .unwrap();
    std::env::remove_var("SETTINGS_TEST_MAX_RESOLUTION_DEPTH");

    assert_eq!(settings.container.max_resolution_depth, 12);
}

/// 测试配置验证
#[test]
fn test_validation_rejects_bad_values() {
    let mut settings = RegistrySettings::default();
    assert!(settings.validate().is_ok());

    settings.logging.level = "loud".to_string();
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::ValidationError { .. })
    ));

    settings.logging.level = "INFO".to_string();
    settings.container.max_resolution_depth = 0;
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}
