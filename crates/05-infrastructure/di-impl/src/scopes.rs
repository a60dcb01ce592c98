//! 内置作用域

use crate::journal::{self, InstanceSlot};
use di_abstractions::{AnyInstance, InstantiationContext, Scope};
use infrastructure_common::{Lifetime, ResolveError};
use std::sync::Arc;

/// 单例作用域
///
/// 缓存首次创建的实例。实例在注入之前写入缓存，循环依赖回到同一注册项时
/// 得到的是同一个（仍在注入中的）实例。注入失败时清除缓存，所在的
/// 最外层解析失败时同样清除。
#[derive(Debug, Default)]
pub struct SingletonScope {
    instance: InstanceSlot,
}

impl SingletonScope {
    /// 创建单例作用域
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否已缓存实例
    pub fn is_initialized(&self) -> bool {
        self.instance.lock().is_some()
    }
}

impl Scope for SingletonScope {
    fn produce_instance(&self, context: &InstantiationContext<'_>) -> Result<AnyInstance, ResolveError> {
        let instance = {
            let mut slot = self.instance.lock();
            if let Some(existing) = slot.as_ref() {
                return Ok(Arc::clone(existing));
            }
            let created = context.create();
            *slot = Some(Arc::clone(&created));
            created
        };
        journal::record(&self.instance);

        if context.perform_injection() {
            if let Err(error) = context.inject(&instance) {
                self.instance.lock().take();
                return Err(error);
            }
        }
        Ok(instance)
    }

    fn name(&self) -> &'static str {
        Lifetime::Singleton.as_str()
    }
}

/// 瞬态作用域，每次解析都创建新实例
#[derive(Debug, Default, Clone, Copy)]
pub struct TransientScope;

impl Scope for TransientScope {
    fn produce_instance(&self, context: &InstantiationContext<'_>) -> Result<AnyInstance, ResolveError> {
        context.instantiate()
    }

    fn name(&self) -> &'static str {
        Lifetime::Transient.as_str()
    }
}

/// 按生命周期创建内置作用域
pub fn scope_for(lifetime: Lifetime) -> Arc<dyn Scope> {
    match lifetime {
        Lifetime::Singleton => Arc::new(SingletonScope::new()),
        Lifetime::Transient => Arc::new(TransientScope),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use di_abstractions::{Activator, Injectable, ResolvedInstance, Resolver};
    use infrastructure_common::TypeInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static INJECTIONS: AtomicUsize = AtomicUsize::new(0);

    struct Counter;

    impl Injectable for Counter {
        fn create() -> Self {
            Counter
        }

        fn inject(&self, _resolver: &dyn Resolver) -> Result<(), ResolveError> {
            INJECTIONS.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Broken;

    impl Injectable for Broken {
        fn create() -> Self {
            Broken
        }

        fn inject(&self, _resolver: &dyn Resolver) -> Result<(), ResolveError> {
            Err(ResolveError::injection_failed::<Self>("依赖缺失"))
        }
    }

    struct EmptyResolver;

    impl Resolver for EmptyResolver {
        fn resolve_instance(&self, requested: TypeInfo, _qualifier: TypeInfo) -> Result<ResolvedInstance, ResolveError> {
            Err(ResolveError::NotRegistered { type_info: requested })
        }

        fn resolve_all_instances(&self, requested: TypeInfo) -> Result<Vec<ResolvedInstance>, ResolveError> {
            Err(ResolveError::NotRegistered { type_info: requested })
        }
    }

    #[test]
    fn singleton_scope_caches_and_skips_injection_when_asked() {
        let activator = Activator::of::<Counter>();
        let scope = SingletonScope::new();
        let before = INJECTIONS.load(Ordering::SeqCst);

        let skipped = scope
            .produce_instance(&InstantiationContext::new(&activator, &EmptyResolver, false))
            .unwrap();
        assert_eq!(INJECTIONS.load(Ordering::SeqCst), before);
        assert!(scope.is_initialized());

        let cached = scope
            .produce_instance(&InstantiationContext::new(&activator, &EmptyResolver, true))
            .unwrap();
        assert!(Arc::ptr_eq(&skipped, &cached));
        assert_eq!(scope.name(), "singleton");
    }

    #[test]
    fn singleton_scope_forgets_instance_when_injection_fails() {
        let activator = Activator::of::<Broken>();
        let scope = SingletonScope::new();

        let result = scope.produce_instance(&InstantiationContext::new(&activator, &EmptyResolver, true));
        assert!(matches!(result, Err(ResolveError::InjectionFailed { .. })));
        assert!(!scope.is_initialized());
    }

    #[test]
    fn singleton_scope_forgets_instance_when_resolution_fails() {
        let activator = Activator::of::<Counter>();
        let scope = SingletonScope::new();
        let context = InstantiationContext::new(&activator, &EmptyResolver, false);

        {
            let _journal = journal::begin();
            scope.produce_instance(&context).unwrap();
            assert!(scope.is_initialized());
        }
        assert!(!scope.is_initialized());

        let journal = journal::begin();
        let kept = scope.produce_instance(&context).unwrap();
        journal.commit();
        assert!(Arc::ptr_eq(&kept, &scope.produce_instance(&context).unwrap()));
    }

    #[test]
    fn transient_scope_creates_fresh_instances() {
        let activator = Activator::of::<Broken>();
        let scope = scope_for(Lifetime::Transient);
        let context = InstantiationContext::new(&activator, &EmptyResolver, false);

        let first = scope.produce_instance(&context).unwrap();
        let second = scope.produce_instance(&context).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(scope.name(), "transient");
    }
}
