//! 组件生命周期定义

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 组件生命周期类型
///
/// 对应注册表内置的两种作用域策略。自定义作用域不需要在这里出现。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// 单例模式 - 同一注册项只创建一个实例
    #[default]
    Singleton,
    /// 瞬时模式 - 每次解析都创建新实例
    Transient,
}

impl Lifetime {
    /// 生命周期名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Transient => "transient",
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lifetime {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "singleton" => Ok(Self::Singleton),
            "transient" => Ok(Self::Transient),
            other => Err(ConfigError::ValidationError {
                message: format!("未知的生命周期: {other}"),
            }),
        }
    }
}
