//! 注册表使用示例
//!
//! 演示接口注册、限定类型解析、具体类型别名和循环依赖处理

use di_abstractions::{
    interface, DiContainer, Injectable, RegistrationOption, Resolver, ResolverExt,
};
use infrastructure_common::{Lifetime, ResolveError};
use infrastructure_composition::{LoggingConfig, RegistryBuilder};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

// 示例：用户实体
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub name: String,
}

// 示例：Repository trait
pub trait UserRepository: Send + Sync {
    fn find_by_id(&self, id: u64) -> Option<User>;
    fn source(&self) -> &'static str;
}

/// 内存仓储
pub struct InMemoryUserRepository {
    users: HashMap<u64, User>,
}

impl Injectable for InMemoryUserRepository {
    fn create() -> Self {
        let users = [(1, "alice"), (2, "bob")]
            .into_iter()
            .map(|(id, name)| {
                (
                    id,
                    User {
                        id,
                        name: name.to_string(),
                    },
                )
            })
            .collect();
        Self { users }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: u64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    fn source(&self) -> &'static str {
        "memory"
    }
}

/// 空仓储
pub struct NullUserRepository;

impl Injectable for NullUserRepository {
    fn create() -> Self {
        NullUserRepository
    }
}

impl UserRepository for NullUserRepository {
    fn find_by_id(&self, _id: u64) -> Option<User> {
        None
    }

    fn source(&self) -> &'static str {
        "null"
    }
}

interface!(UserRepository => [InMemoryUserRepository, NullUserRepository]);

// 示例：用户服务，依赖内存仓储和审计日志
pub struct UserService {
    repository: OnceCell<Arc<InMemoryUserRepository>>,
    audit: OnceCell<Arc<AuditLog>>,
}

impl Injectable for UserService {
    fn create() -> Self {
        Self {
            repository: OnceCell::new(),
            audit: OnceCell::new(),
        }
    }

    fn inject(&self, resolver: &dyn Resolver) -> Result<(), ResolveError> {
        let repository = resolver.resolve_qualified::<dyn UserRepository, InMemoryUserRepository>()?;
        let _ = self.repository.set(repository);
        let _ = self.audit.set(resolver.resolve::<AuditLog>()?);
        Ok(())
    }
}

impl UserService {
    pub fn get_user(&self, id: u64) -> Option<User> {
        let user = self.repository.get()?.find_by_id(id);
        if let Some(audit) = self.audit.get() {
            audit.record(id, user.is_some());
        }
        user
    }
}

// 示例：审计日志反向依赖用户服务，形成循环
pub struct AuditLog {
    service: OnceCell<Arc<UserService>>,
}

impl Injectable for AuditLog {
    fn create() -> Self {
        Self {
            service: OnceCell::new(),
        }
    }

    fn inject(&self, resolver: &dyn Resolver) -> Result<(), ResolveError> {
        let _ = self.service.set(resolver.resolve::<UserService>()?);
        Ok(())
    }
}

impl AuditLog {
    fn record(&self, id: u64, found: bool) {
        info!(
            "审计: 查询用户 {} (命中: {}, 服务已关联: {})",
            id,
            found,
            self.service.get().is_some()
        );
    }
}

fn main() -> anyhow::Result<()> {
    let container = RegistryBuilder::new()
        .add_config_env_vars("REGISTRY_DEMO")
        .with_logging(LoggingConfig::development())
        .with_default_lifetime(Lifetime::Singleton)
        .build()?;

    // 接口注册，内存仓储同时以具体类型注册
    container.register_as::<dyn UserRepository, InMemoryUserRepository>(&[
        RegistrationOption::AddConcreteTypeRegistration,
    ])?;
    container.register_as::<dyn UserRepository, NullUserRepository>(&[])?;
    container.register::<UserService>();
    container.register::<AuditLog>();

    // 未指定限定类型时存在两个候选
    if let Err(error) = container.resolve::<dyn UserRepository>() {
        info!("预期的歧义错误: {}", error);
    }

    let sources: Vec<_> = container
        .resolve_all::<dyn UserRepository>()?
        .iter()
        .map(|repository| repository.source())
        .collect();
    info!("全部仓储: {:?}", sources);

    let qualified = container.resolve_qualified::<dyn UserRepository, InMemoryUserRepository>()?;
    let concrete = container.resolve::<InMemoryUserRepository>()?;
    info!("别名共享实例: {}", Arc::ptr_eq(&qualified, &concrete));

    let service = container.resolve::<UserService>()?;
    match service.get_user(1) {
        Some(user) => info!("查询到用户: {} ({})", user.name, user.id),
        None => info!("未查询到用户"),
    }

    info!("容器统计: {:?}", container.stats());
    Ok(())
}
