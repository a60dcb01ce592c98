//! # 依赖注入具体实现
//!
//! 提供按类型标识注册和解析组件的容器实现。
//!
//! - [`DiContainerImpl`] - 容器，注册表和解析器
//! - [`SingletonScope`] / [`TransientScope`] - 内置作用域
//! - [`shared_container`] - 进程级共享容器

mod container;
mod guard;
mod journal;
mod registration;
mod scopes;
mod shared;
mod table;

pub use container::DiContainerImpl;
pub use registration::RegistrationHandle;
pub use scopes::{scope_for, SingletonScope, TransientScope};
pub use shared::{init_shared_container, shared_container};
pub use table::EntryId;
