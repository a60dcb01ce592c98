//! 作用域抽象接口
//!
//! 作用域决定注册项被多次解析时返回共享实例还是新实例。

use crate::factory::{Activator, AnyInstance};
use crate::resolver::Resolver;
use infrastructure_common::{ResolveError, TypeInfo};

/// 作用域 trait
pub trait Scope: Send + Sync {
    /// 生成实例
    ///
    /// 当 `context.perform_injection()` 为 `false` 时不得调用 `inject`，
    /// 这是注入守卫打破循环依赖的方式。
    fn produce_instance(&self, context: &InstantiationContext<'_>) -> Result<AnyInstance, ResolveError>;

    /// 作用域名称
    fn name(&self) -> &'static str;
}

/// 实例化上下文
///
/// 由解析器在调用作用域时创建，仅在一次 `produce_instance` 调用内有效。
pub struct InstantiationContext<'a> {
    activator: &'a Activator,
    resolver: &'a dyn Resolver,
    perform_injection: bool,
}

impl<'a> InstantiationContext<'a> {
    /// 创建新的实例化上下文
    pub fn new(activator: &'a Activator, resolver: &'a dyn Resolver, perform_injection: bool) -> Self {
        Self {
            activator,
            resolver,
            perform_injection,
        }
    }

    /// 是否需要对生成的实例执行依赖注入
    pub fn perform_injection(&self) -> bool {
        self.perform_injection
    }

    /// 将要生成的具体类型
    pub fn concrete_type(&self) -> TypeInfo {
        self.activator.type_info()
    }

    /// 创建裸实例
    pub fn create(&self) -> AnyInstance {
        self.activator.create()
    }

    /// 对实例执行依赖注入
    pub fn inject(&self, instance: &AnyInstance) -> Result<(), ResolveError> {
        self.activator.inject(instance, self.resolver)
    }

    /// 创建实例，并在需要时执行依赖注入
    pub fn instantiate(&self) -> Result<AnyInstance, ResolveError> {
        let instance = self.create();
        if self.perform_injection {
            self.inject(&instance)?;
        }
        Ok(instance)
    }
}
