//! 接口类型转换
//!
//! 把具体类型的实例转换为接口（trait 对象）实例。泛型代码无法直接
//! 表达 `Arc<C>` 到 `Arc<dyn Trait>` 的非定长转换，因此由
//! [`InterfaceFor`] 显式声明，通常通过 [`interface!`](crate::interface) 宏生成。

use crate::factory::{AnyInstance, Injectable};
use infrastructure_common::{ResolveError, TypeInfo};
use std::any::Any;
use std::sync::Arc;

/// 接口实现声明
///
/// `I: InterfaceFor<C>` 表示具体类型 `C` 可以以 `I` 的身份注册和解析。
pub trait InterfaceFor<C: Injectable>: Send + Sync + 'static {
    /// 将具体实例转换为接口实例
    fn upcast(instance: Arc<C>) -> Arc<Self>;
}

// 每个可注入类型都可以注册为其自身
impl<T: Injectable> InterfaceFor<T> for T {
    fn upcast(instance: Arc<T>) -> Arc<Self> {
        instance
    }
}

/// 接口转换函数，返回装箱的 `Arc<I>`
pub type InterfaceCaster = fn(AnyInstance) -> Result<Box<dyn Any + Send + Sync>, ResolveError>;

/// 生成 `C` 到接口 `I` 的转换函数
pub fn caster_for<I, C>() -> InterfaceCaster
where
    I: ?Sized + InterfaceFor<C>,
    C: Injectable,
{
    cast_instance::<I, C>
}

fn cast_instance<I, C>(instance: AnyInstance) -> Result<Box<dyn Any + Send + Sync>, ResolveError>
where
    I: ?Sized + InterfaceFor<C>,
    C: Injectable,
{
    let concrete = instance
        .downcast::<C>()
        .map_err(|_| ResolveError::TypeMismatch {
            expected: TypeInfo::of::<C>(),
            actual: TypeInfo::of::<AnyInstance>(),
        })?;
    Ok(Box::new(I::upcast(concrete)))
}

/// 声明 trait 对象的实现类型
///
/// ```rust
/// use di_abstractions::{interface, Injectable};
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Injectable for English {
///     fn create() -> Self {
///         English
///     }
/// }
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
///
/// interface!(Greeter => [English]);
/// ```
#[macro_export]
macro_rules! interface {
    ($interface:path => [$($implementation:ty),+ $(,)?]) => {
        $(
            impl $crate::InterfaceFor<$implementation> for dyn $interface {
                fn upcast(
                    instance: ::std::sync::Arc<$implementation>,
                ) -> ::std::sync::Arc<Self> {
                    instance
                }
            }
        )+
    };
}
