//! 依赖注入容器抽象接口
//!
//! 提供注册、移除和统计等容器操作，解析能力来自 [`Resolver`]。

use crate::factory::Injectable;
use crate::interface::InterfaceFor;
use crate::registry::{Registration, RegistrationOption};
use crate::resolver::Resolver;
use crate::scope::Scope;
use infrastructure_common::RegistrationError;
use std::sync::Arc;

/// 依赖注入容器 trait
///
/// 所有操作都通过 `&self` 完成，容器内部负责同步。
pub trait DiContainer: Resolver {
    /// 注册句柄类型
    type Registration: Registration;

    /// 以自身类型注册
    ///
    /// 重复注册返回已有的注册项。
    fn register<T: Injectable>(&self) -> Self::Registration;

    /// 以接口类型注册，使用默认作用域
    fn register_as<I, C>(&self, options: &[RegistrationOption]) -> Result<Self::Registration, RegistrationError>
    where
        I: ?Sized + InterfaceFor<C>,
        C: Injectable;

    /// 以接口类型注册，使用指定作用域
    fn register_in_scope<I, C>(
        &self,
        scope: Arc<dyn Scope>,
        options: &[RegistrationOption],
    ) -> Result<Self::Registration, RegistrationError>
    where
        I: ?Sized + InterfaceFor<C>,
        C: Injectable;

    /// 移除某类型下的全部注册项，未注册时不做任何事
    fn remove_registration<T: ?Sized + 'static>(&self);

    /// 清空所有注册项
    fn clear_all_registrations(&self);

    /// 检查类型是否已注册
    fn is_registered<T: ?Sized + 'static>(&self) -> bool;

    /// 获取容器统计信息
    fn stats(&self) -> ContainerStats;
}

/// 容器统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// 已注册的类型标识数量
    pub registered_identities: usize,
    /// 注册项总数
    pub registrations: usize,
    /// 成功的解析次数
    pub resolutions: u64,
    /// 失败的解析次数
    pub resolution_errors: u64,
}
