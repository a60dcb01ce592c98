//! 组件实例创建抽象接口
//!
//! 提供可注入组件的创建和依赖注入入口

use crate::resolver::Resolver;
use infrastructure_common::{ResolveError, TypeInfo};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除后的组件实例
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

/// 可注入组件 trait
///
/// 实例的构造分为两步：[`Injectable::create`] 只负责创建裸实例，
/// [`Injectable::inject`] 再通过解析器填充依赖。实例在注入时已经被
/// `Arc` 共享，所以依赖字段需要内部可变性（例如 `OnceCell`）。
///
/// 当注入守卫检测到循环依赖时，实例会在不调用 `inject` 的情况下返回，
/// 因此依赖字段在循环路径上可能保持为空。
pub trait Injectable: Send + Sync + 'static {
    /// 创建未注入依赖的实例
    ///
    /// 不允许在这里解析其他组件。
    fn create() -> Self
    where
        Self: Sized;

    /// 注入依赖
    fn inject(&self, resolver: &dyn Resolver) -> Result<(), ResolveError> {
        let _ = resolver;
        Ok(())
    }
}

type CreateFn = fn() -> AnyInstance;
type InjectFn = fn(&AnyInstance, &dyn Resolver) -> Result<(), ResolveError>;

/// 组件激活器
///
/// 保存某个具体类型的创建和注入函数，供作用域在运行时调用。
#[derive(Clone, Copy)]
pub struct Activator {
    type_info: TypeInfo,
    create: CreateFn,
    inject: InjectFn,
}

impl Activator {
    /// 为具体类型创建激活器
    pub fn of<T: Injectable>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            create: create_instance::<T>,
            inject: inject_instance::<T>,
        }
    }

    /// 激活器创建的具体类型
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 创建裸实例
    pub fn create(&self) -> AnyInstance {
        (self.create)()
    }

    /// 对实例执行依赖注入
    pub fn inject(&self, instance: &AnyInstance, resolver: &dyn Resolver) -> Result<(), ResolveError> {
        (self.inject)(instance, resolver)
    }
}

impl fmt::Debug for Activator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activator")
            .field("type_info", &self.type_info.name)
            .finish()
    }
}

fn create_instance<T: Injectable>() -> AnyInstance {
    Arc::new(T::create())
}

fn inject_instance<T: Injectable>(
    instance: &AnyInstance,
    resolver: &dyn Resolver,
) -> Result<(), ResolveError> {
    let typed = instance
        .downcast_ref::<T>()
        .ok_or_else(|| ResolveError::TypeMismatch {
            expected: TypeInfo::of::<T>(),
            actual: TypeInfo::of::<AnyInstance>(),
        })?;
    typed.inject(resolver)
}
