//! 注册表配置
//!
//! 从 TOML 加载容器和日志配置，并支持环境变量覆盖。

use crate::builder::LoggingConfig;
use infrastructure_common::{ConfigError, ContainerConfig, Lifetime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 注册表配置
///
/// ```toml
/// [container]
/// default_lifetime = "singleton"
/// max_resolution_depth = 100
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// 容器配置
    pub container: ContainerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl RegistrySettings {
    /// 从 TOML 文本加载
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })
    }

    /// 从 TOML 文件加载
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载 TOML 配置文件: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 使用进程环境变量覆盖配置
    pub fn with_env_overrides(self, prefix: &str) -> Result<Self, ConfigError> {
        self.with_overrides(prefix, std::env::vars())
    }

    /// 使用给定的键值对覆盖配置
    ///
    /// 识别 `<PREFIX>_DEFAULT_LIFETIME`、`<PREFIX>_MAX_RESOLUTION_DEPTH`
    /// 和 `<PREFIX>_LOG_LEVEL`，其他变量忽略。
    pub fn with_overrides<I>(mut self, prefix: &str, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        debug!("加载环境变量，前缀: {}", prefix);

        for (key, value) in vars {
            let Some(name) = key
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('_'))
            else {
                continue;
            };

            match name.to_lowercase().as_str() {
                "default_lifetime" => {
                    self.container.default_lifetime = value.parse::<Lifetime>()?;
                }
                "max_resolution_depth" => {
                    self.container.max_resolution_depth =
                        value.parse().map_err(|_| ConfigError::ValidationError {
                            message: format!("{} 不是有效的解析深度: {}", key, value),
                        })?;
                }
                "log_level" => {
                    self.logging.level = value;
                }
                _ => debug!("忽略未识别的环境变量: {}", key),
            }
        }

        Ok(self)
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.container.validate()?;
        self.logging.tracing_level().map(|_| ())
    }
}
