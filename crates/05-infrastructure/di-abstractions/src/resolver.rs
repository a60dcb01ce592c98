//! 组件解析器抽象接口
//!
//! 提供按类型标识解析组件实例的能力

use crate::factory::{AnyInstance, Injectable};
use infrastructure_common::{ResolveError, TypeInfo};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 组件解析器 trait
///
/// 对象安全，组件在 [`Injectable::inject`] 中通过 `&dyn Resolver` 解析依赖。
/// 泛型形式的解析方法由 [`ResolverExt`] 提供。
pub trait Resolver: Send + Sync {
    /// 按请求类型和限定类型解析单个实例
    ///
    /// `qualifier == requested` 表示不指定限定类型，此时请求类型下必须恰好
    /// 存在一个注册项。
    fn resolve_instance(
        &self,
        requested: TypeInfo,
        qualifier: TypeInfo,
    ) -> Result<ResolvedInstance, ResolveError>;

    /// 解析请求类型下的全部实例，按注册顺序返回
    fn resolve_all_instances(&self, requested: TypeInfo) -> Result<Vec<ResolvedInstance>, ResolveError>;
}

/// 解析结果
///
/// 同时保存具体类型实例和转换后的接口实例（装箱的 `Arc<I>`）。
pub struct ResolvedInstance {
    concrete: TypeInfo,
    instance: AnyInstance,
    interface: Box<dyn Any + Send + Sync>,
}

impl ResolvedInstance {
    /// 创建解析结果
    pub fn new(concrete: TypeInfo, instance: AnyInstance, interface: Box<dyn Any + Send + Sync>) -> Self {
        Self {
            concrete,
            instance,
            interface,
        }
    }

    /// 实例的具体类型
    pub fn concrete_type(&self) -> TypeInfo {
        self.concrete
    }

    /// 类型擦除的具体实例
    pub fn instance(&self) -> &AnyInstance {
        &self.instance
    }

    /// 取出接口实例
    pub fn into_interface<I: ?Sized + 'static>(self) -> Result<Arc<I>, ResolveError> {
        let actual = self.concrete;
        self.interface
            .downcast::<Arc<I>>()
            .map(|interface| *interface)
            .map_err(|_| ResolveError::TypeMismatch {
                expected: TypeInfo::of::<I>(),
                actual,
            })
    }

    /// 取出具体类型实例
    pub fn into_concrete<Q: Send + Sync + 'static>(self) -> Result<Arc<Q>, ResolveError> {
        let actual = self.concrete;
        self.instance
            .downcast::<Q>()
            .map_err(|_| ResolveError::TypeMismatch {
                expected: TypeInfo::of::<Q>(),
                actual,
            })
    }
}

impl fmt::Debug for ResolvedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedInstance")
            .field("concrete", &self.concrete.name)
            .finish_non_exhaustive()
    }
}

/// 泛型解析方法
pub trait ResolverExt: Resolver {
    /// 解析 `I` 的唯一实例
    fn resolve<I>(&self) -> Result<Arc<I>, ResolveError>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let requested = TypeInfo::of::<I>();
        self.resolve_instance(requested, requested)?
            .into_interface::<I>()
    }

    /// 在 `I` 的注册项中按具体类型 `Q` 解析，返回具体类型实例
    fn resolve_qualified<I, Q>(&self) -> Result<Arc<Q>, ResolveError>
    where
        I: ?Sized + Send + Sync + 'static,
        Q: Injectable,
    {
        self.resolve_instance(TypeInfo::of::<I>(), TypeInfo::of::<Q>())?
            .into_concrete::<Q>()
    }

    /// 解析 `I` 的全部实例
    fn resolve_all<I>(&self) -> Result<Vec<Arc<I>>, ResolveError>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.resolve_all_instances(TypeInfo::of::<I>())?
            .into_iter()
            .map(ResolvedInstance::into_interface::<I>)
            .collect()
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}
