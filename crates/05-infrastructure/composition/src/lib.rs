//! # 注册表组合层
//!
//! 负责把配置、日志和依赖注入容器组合成可直接使用的注册表。
//!
//! ## 主要功能
//!
//! - **注册表构建器**: 使用构建者模式组装容器
//! - **配置加载**: TOML 文件和环境变量
//! - **日志初始化**: 基于 `tracing-subscriber`
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{LoggingConfig, RegistryBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let container = RegistryBuilder::new()
//!         .add_config_toml("registry.toml")?
//!         .add_config_env_vars("ADSP")
//!         .with_logging(LoggingConfig::development())
//!         .build()?;
//!
//!     println!("容器: {}", container.id());
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod settings;

#[cfg(test)]
mod tests;

// 重新导出主要类型
pub use builder::{LoggingConfig, RegistryBuilder};
pub use settings::RegistrySettings;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
