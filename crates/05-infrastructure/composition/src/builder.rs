//! 注册表构建器

use crate::settings::RegistrySettings;
use di_impl::{init_shared_container, DiContainerImpl};
use infrastructure_common::{ConfigError, InfrastructureError, Lifetime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 注册表构建器
///
/// 使用建造者模式组合配置、初始化日志并创建容器
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// 注册表配置
    settings: RegistrySettings,
    /// 环境变量前缀
    env_prefix: Option<String>,
    /// 是否启用日志初始化
    logging_enabled: bool,
}

impl RegistryBuilder {
    /// 创建新的注册表构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用完整配置
    pub fn with_settings(mut self, settings: RegistrySettings) -> Self {
        self.settings = settings;
        self
    }

    /// 添加 TOML 配置文件
    pub fn add_config_toml<P: AsRef<Path>>(mut self, path: P) -> Result<Self, InfrastructureError> {
        let path = path.as_ref();
        self.settings = RegistrySettings::from_toml_file(path)?;
        info!("添加 TOML 配置文件: {}", path.display());
        Ok(self)
    }

    /// 添加 TOML 配置文本
    pub fn add_config_toml_str(mut self, content: &str) -> Result<Self, InfrastructureError> {
        self.settings = RegistrySettings::from_toml_str(content)?;
        Ok(self)
    }

    /// 添加环境变量配置，构建时应用
    pub fn add_config_env_vars<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        debug!("添加环境变量配置，前缀: {}", prefix);
        self.env_prefix = Some(prefix);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.settings.logging = config;
        self.logging_enabled = true;
        self
    }

    /// 设置默认生命周期
    pub fn with_default_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.settings.container.default_lifetime = lifetime;
        self
    }

    /// 设置最大解析深度
    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.settings.container.max_resolution_depth = depth;
        self
    }

    /// 当前配置（不含尚未应用的环境变量）
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// 构建独立的容器
    pub fn build(self) -> Result<DiContainerImpl, InfrastructureError> {
        let settings = self.prepare()?;
        let container = DiContainerImpl::with_config(settings.container);
        info!("注册表构建完成: {}", container.id());
        Ok(container)
    }

    /// 构建并安装进程级共享容器
    ///
    /// 共享容器已经存在时返回错误。
    pub fn build_shared(self) -> Result<Arc<DiContainerImpl>, InfrastructureError> {
        let settings = self.prepare()?;
        let container = init_shared_container(settings.container).map_err(|existing| {
            InfrastructureError::BootstrapFailed {
                message: format!("共享容器已存在: {}", existing.id()),
            }
        })?;
        info!("共享注册表构建完成: {}", container.id());
        Ok(container)
    }

    /// 应用环境变量、验证配置并初始化日志
    fn prepare(self) -> Result<RegistrySettings, InfrastructureError> {
        let mut settings = self.settings;
        if let Some(prefix) = &self.env_prefix {
            settings = settings.with_env_overrides(prefix)?;
        }
        settings.validate()?;

        // 只有在明确配置了日志时才初始化日志
        // 避免在测试环境中重复初始化
        if self.logging_enabled {
            initialize_logging(&settings.logging)?;
        }
        Ok(settings)
    }
}

/// 初始化日志系统
fn initialize_logging(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.tracing_level()?)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| InfrastructureError::BootstrapFailed {
        message: format!("日志初始化失败: {}", e),
    })?;

    info!("日志系统初始化完成");
    Ok(())
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 解析日志级别
    pub fn tracing_level(&self) -> Result<tracing::Level, ConfigError> {
        self.level
            .parse()
            .map_err(|_| ConfigError::ValidationError {
                message: format!("无效的日志级别: {}", self.level),
            })
    }
}
