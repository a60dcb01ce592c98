//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件注册和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`DiContainer`] - 依赖注入容器接口
//! - [`Resolver`] - 组件解析器接口
//! - [`Scope`] - 实例作用域接口
//! - [`Injectable`] - 可注入组件接口
//! - [`InterfaceFor`] - 接口实现声明

pub mod container;
pub mod factory;
pub mod interface;
pub mod registry;
pub mod resolver;
pub mod scope;

pub use container::*;
pub use factory::*;
pub use interface::*;
pub use registry::*;
pub use resolver::*;
pub use scope::*;
