//! 依赖注入容器实现

use crate::guard::{self, GuardKey};
use crate::journal::{self, SingletonJournal};
use crate::registration::RegistrationHandle;
use crate::scopes::scope_for;
use crate::table::{RegistrationEntry, RegistryTable, Selected};
use di_abstractions::{
    caster_for, Activator, ContainerStats, DiContainer, Injectable, InstantiationContext,
    InterfaceFor, RegistrationOption, ResolvedInstance, Resolver, Scope,
};
use infrastructure_common::{ContainerConfig, RegistrationError, ResolveError, TypeInfo};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

/// 依赖注入容器
///
/// 容器是一个监视器：每个公开操作在整个执行期间持有可重入锁，同一线程上
/// 由依赖注入触发的嵌套解析可以再次进入。注册表的借用在调用作用域和
/// `inject` 之前释放，因此 `inject` 中也可以注册或解析组件。
pub struct DiContainerImpl {
    id: Uuid,
    config: ContainerConfig,
    table: ReentrantMutex<RefCell<RegistryTable>>,
    resolutions: AtomicU64,
    resolution_errors: AtomicU64,
}

impl DiContainerImpl {
    /// 使用默认配置创建容器
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// 使用指定配置创建容器
    pub fn with_config(config: ContainerConfig) -> Self {
        let id = Uuid::new_v4();
        debug!(
            "创建依赖注入容器: {} (默认生命周期: {}, 最大解析深度: {})",
            id, config.default_lifetime, config.max_resolution_depth
        );
        Self {
            id,
            config,
            table: ReentrantMutex::new(RefCell::new(RegistryTable::default())),
            resolutions: AtomicU64::new(0),
            resolution_errors: AtomicU64::new(0),
        }
    }

    /// 容器标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    fn register_with<I, C>(
        &self,
        scope: Option<Arc<dyn Scope>>,
        options: &[RegistrationOption],
    ) -> Result<RegistrationHandle, RegistrationError>
    where
        I: ?Sized + InterfaceFor<C>,
        C: Injectable,
    {
        let registered = TypeInfo::of::<I>();
        let concrete = TypeInfo::of::<C>();
        let add_concrete = options.contains(&RegistrationOption::AddConcreteTypeRegistration);

        let monitor = self.table.lock();
        let mut table = monitor.borrow_mut();

        if let Some(existing) = table.find(registered, concrete) {
            debug!("组件已注册，返回已有注册项: {} -> {}", registered, concrete);
            return Ok(RegistrationHandle::from_entry(&existing));
        }

        if add_concrete && registered == concrete {
            warn!("组件注册失败，具体类型注册不能关联到其自身: {}", concrete);
            return Err(RegistrationError::SelfAlias {
                type_info: concrete,
            });
        }

        let primary = self.insert_entry::<I, C>(&mut table, scope);
        if add_concrete {
            Self::link_concrete::<C>(&mut table, &primary);
        }
        Ok(RegistrationHandle::from_entry(&primary))
    }

    fn insert_entry<I, C>(&self, table: &mut RegistryTable, scope: Option<Arc<dyn Scope>>) -> Arc<RegistrationEntry>
    where
        I: ?Sized + InterfaceFor<C>,
        C: Injectable,
    {
        let scope = scope.unwrap_or_else(|| scope_for(self.config.default_lifetime));
        let entry = table.insert(
            TypeInfo::of::<I>(),
            Activator::of::<C>(),
            scope,
            caster_for::<I, C>(),
            None,
        );
        info!(
            "注册组件: {} -> {} (作用域: {}, 编号: {})",
            entry.registered,
            entry.instantiatable,
            entry.scope.name(),
            entry.id
        );
        entry
    }

    fn link_concrete<C: Injectable>(table: &mut RegistryTable, primary: &RegistrationEntry) {
        let concrete = TypeInfo::of::<C>();
        let activator = Activator::of::<C>();
        let scope = Arc::clone(&primary.scope);
        let caster = caster_for::<C, C>();

        if let Some(existing) = table.find(concrete, concrete) {
            let replaced = table.replace(existing.id, activator, Arc::clone(&scope), caster, Some(primary.id));
            if let Some(alias) = replaced {
                debug!(
                    "具体类型已单独注册，改为关联: {} ({} -> {}) -> {} ({})",
                    concrete, existing.id, alias.id, primary.registered, primary.id
                );
                return;
            }
        }

        let alias = table.insert(concrete, activator, scope, caster, Some(primary.id));
        debug!(
            "关联具体类型注册: {} ({}) -> {} ({})",
            concrete, alias.id, primary.registered, primary.id
        );
    }

    fn produce(&self, selected: &Selected) -> Result<ResolvedInstance, ResolveError> {
        let authority = &selected.authority;
        let key = GuardKey {
            container: self.id,
            entry: authority.id,
        };

        let entered = guard::enter(key, self.config.max_resolution_depth, authority.instantiatable)?;
        let perform_injection = entered.perform_injection();
        if !perform_injection {
            debug!("检测到循环依赖，跳过依赖注入: {}", authority.instantiatable);
        }

        let context = InstantiationContext::new(&authority.activator, self, perform_injection);
        let instance = authority.scope.produce_instance(&context)?;
        drop(entered);

        let interface = (selected.entry.caster)(Arc::clone(&instance))?;
        Ok(ResolvedInstance::new(authority.instantiatable, instance, interface))
    }

    /// 最外层解析开始日志帧，嵌套解析记录到同一帧中
    fn begin_journal(&self) -> Option<SingletonJournal> {
        (guard::depth(self.id) == 0).then(journal::begin)
    }

    /// 成功时提交日志帧，失败时丢弃以回滚本次写入的单例缓存
    fn settle<T>(journal: Option<SingletonJournal>, result: &Result<T, ResolveError>) {
        if let (Some(journal), Ok(_)) = (journal, result) {
            journal.commit();
        }
    }

    fn record<T>(&self, requested: TypeInfo, result: &Result<T, ResolveError>) {
        match result {
            Ok(_) => {
                self.resolutions.fetch_add(1, Ordering::Relaxed);
            }
            Err(error) => {
                self.resolution_errors.fetch_add(1, Ordering::Relaxed);
                warn!("组件解析失败: {}, 错误: {}", requested, error);
            }
        }
    }
}

impl Default for DiContainerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DiContainerImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiContainerImpl")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

impl Resolver for DiContainerImpl {
    fn resolve_instance(
        &self,
        requested: TypeInfo,
        qualifier: TypeInfo,
    ) -> Result<ResolvedInstance, ResolveError> {
        let monitor = self.table.lock();
        trace!(
            "解析组件: {} (限定类型: {}, 深度: {})",
            requested,
            qualifier,
            guard::depth(self.id)
        );

        let journal = self.begin_journal();
        let selected = monitor.borrow().select(requested, qualifier);
        let result = selected.and_then(|selected| self.produce(&selected));
        Self::settle(journal, &result);
        self.record(requested, &result);
        result
    }

    fn resolve_all_instances(&self, requested: TypeInfo) -> Result<Vec<ResolvedInstance>, ResolveError> {
        let monitor = self.table.lock();
        trace!("解析全部组件: {}", requested);

        let journal = self.begin_journal();
        let candidates = monitor.borrow().candidates(requested);
        let result = candidates.and_then(|candidates| {
            candidates
                .iter()
                .map(|selected| self.produce(selected))
                .collect::<Result<Vec<_>, _>>()
        });
        Self::settle(journal, &result);
        self.record(requested, &result);
        result
    }
}

impl DiContainer for DiContainerImpl {
    type Registration = RegistrationHandle;

    fn register<T: Injectable>(&self) -> RegistrationHandle {
        let registered = TypeInfo::of::<T>();
        let monitor = self.table.lock();
        let mut table = monitor.borrow_mut();

        match table.find(registered, registered) {
            Some(existing) => {
                debug!("组件已注册，返回已有注册项: {}", registered);
                RegistrationHandle::from_entry(&existing)
            }
            None => RegistrationHandle::from_entry(&self.insert_entry::<T, T>(&mut table, None)),
        }
    }

    fn register_as<I, C>(&self, options: &[RegistrationOption]) -> Result<RegistrationHandle, RegistrationError>
    where
        I: ?Sized + InterfaceFor<C>,
        C: Injectable,
    {
        self.register_with::<I, C>(None, options)
    }

    fn register_in_scope<I, C>(
        &self,
        scope: Arc<dyn Scope>,
        options: &[RegistrationOption],
    ) -> Result<RegistrationHandle, RegistrationError>
    where
        I: ?Sized + InterfaceFor<C>,
        C: Injectable,
    {
        self.register_with::<I, C>(Some(scope), options)
    }

    fn remove_registration<T: ?Sized + 'static>(&self) {
        let registered = TypeInfo::of::<T>();
        let monitor = self.table.lock();
        let removed = monitor.borrow_mut().remove(registered);
        if removed > 0 {
            info!("移除组件注册: {} (共 {} 项)", registered, removed);
        }
    }

    fn clear_all_registrations(&self) {
        let monitor = self.table.lock();
        let cleared = monitor.borrow_mut().clear();
        info!("清空所有组件注册 (共 {} 项)", cleared);
    }

    fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        let monitor = self.table.lock();
        let registered = monitor.borrow().contains(TypeInfo::of::<T>());
        registered
    }

    fn stats(&self) -> ContainerStats {
        let monitor = self.table.lock();
        let table = monitor.borrow();
        ContainerStats {
            registered_identities: table.identity_count(),
            registrations: table.registration_count(),
            resolutions: self.resolutions.load(Ordering::Relaxed),
            resolution_errors: self.resolution_errors.load(Ordering::Relaxed),
        }
    }
}
