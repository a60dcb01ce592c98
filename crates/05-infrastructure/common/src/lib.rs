//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn ADSP 依赖注册表的公共类型。
//!
//! ## 核心类型
//!
//! - [`TypeInfo`] - 运行时类型标识，既是注册键也是限定类型
//! - [`Lifetime`] - 内置的实例生命周期
//! - [`ContainerConfig`] - 容器配置
//! - [`RegistrationError`] / [`ResolveError`] - 注册与解析错误
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的运行时类型标识
//! - 错误携带出错的类型标识，便于定位配置问题
//! - 配置均可通过 serde 反序列化

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
