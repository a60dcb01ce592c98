//! 容器配置定义

use crate::errors::ConfigError;
use crate::lifecycle::Lifetime;
use serde::{Deserialize, Serialize};

/// 默认最大解析深度
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 100;

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 未显式指定作用域时使用的生命周期
    pub default_lifetime: Lifetime,
    /// 最大解析深度（注入守卫栈的最大长度）
    pub max_resolution_depth: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::Singleton,
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}

impl ContainerConfig {
    /// 设置默认生命周期
    pub fn with_default_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.default_lifetime = lifetime;
        self
    }

    /// 设置最大解析深度
    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = depth;
        self
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_resolution_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_resolution_depth 必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: ContainerConfig = toml::from_str("default_lifetime = \"transient\"").unwrap();
        assert_eq!(config.default_lifetime, Lifetime::Transient);
        assert_eq!(config.max_resolution_depth, DEFAULT_MAX_RESOLUTION_DEPTH);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = ContainerConfig::default().with_max_resolution_depth(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
        assert!(ContainerConfig::default().validate().is_ok());
    }
}
