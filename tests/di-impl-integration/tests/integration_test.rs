//! 依赖注入容器的跨线程集成测试

use di_abstractions::{interface, DiContainer, Injectable, Resolver, ResolverExt};
use di_impl::DiContainerImpl;
use infrastructure_common::{ContainerConfig, Lifetime, ResolveError};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

static CREATED_REPOSITORIES: AtomicUsize = AtomicUsize::new(0);

trait Repository: Send + Sync {
    fn name(&self) -> &'static str;
}

struct SqlRepository;

impl Injectable for SqlRepository {
    fn create() -> Self {
        CREATED_REPOSITORIES.fetch_add(1, Ordering::SeqCst);
        SqlRepository
    }
}

impl Repository for SqlRepository {
    fn name(&self) -> &'static str {
        "sql"
    }
}

interface!(Repository => [SqlRepository]);

struct OrderService {
    repository: OnceCell<Arc<dyn Repository>>,
}

impl Injectable for OrderService {
    fn create() -> Self {
        Self {
            repository: OnceCell::new(),
        }
    }

    fn inject(&self, resolver: &dyn Resolver) -> Result<(), ResolveError> {
        let _ = self.repository.set(resolver.resolve::<dyn Repository>()?);
        Ok(())
    }
}

impl OrderService {
    fn repository(&self) -> Option<&Arc<dyn Repository>> {
        self.repository.get()
    }
}

struct Node {
    peer: OnceCell<Arc<Peer>>,
}

struct Peer {
    node: OnceCell<Arc<Node>>,
}

impl Injectable for Node {
    fn create() -> Self {
        Self {
            peer: OnceCell::new(),
        }
    }

    fn inject(&self, resolver: &dyn Resolver) -> Result<(), ResolveError> {
        let _ = self.peer.set(resolver.resolve::<Peer>()?);
        Ok(())
    }
}

impl Injectable for Peer {
    fn create() -> Self {
        Self {
            node: OnceCell::new(),
        }
    }

    fn inject(&self, resolver: &dyn Resolver) -> Result<(), ResolveError> {
        let _ = self.node.set(resolver.resolve::<Node>()?);
        Ok(())
    }
}

struct Clock;

impl Injectable for Clock {
    fn create() -> Self {
        Clock
    }
}

/// 测试多线程解析同一单例
#[test]
fn test_concurrent_singleton_resolution() -> anyhow::Result<()> {
    let container = DiContainerImpl::new();
    container.register_as::<dyn Repository, SqlRepository>(&[])?;
    container.register::<OrderService>();

    let before = CREATED_REPOSITORIES.load(Ordering::SeqCst);
    let barrier = &Barrier::new(8);
    let container = &container;

    let services: Vec<Arc<OrderService>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    container.resolve::<OrderService>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("解析线程不应崩溃"))
            .collect::<Result<_, _>>()
    })?;

    assert_eq!(CREATED_REPOSITORIES.load(Ordering::SeqCst) - before, 1);
    for service in &services {
        assert!(Arc::ptr_eq(service, &services[0]));
        assert_eq!(service.repository().map(|r| r.name()), Some("sql"));
    }
    assert_eq!(container.stats().resolutions, 8 + 1);
    Ok(())
}

/// 测试不同线程的循环依赖检测互不影响
#[test]
fn test_cycle_detection_is_per_thread() -> anyhow::Result<()> {
    let config = ContainerConfig::default().with_default_lifetime(Lifetime::Transient);
    let container = DiContainerImpl::with_config(config);
    container.register::<Node>();
    container.register::<Peer>();

    let barrier = &Barrier::new(4);
    let container = &container;
    thread::scope(|scope| -> anyhow::Result<()> {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    container.resolve::<Node>()
                })
            })
            .collect();

        for handle in handles {
            let node = handle.join().expect("解析线程不应崩溃")?;
            let peer = node.peer.get().expect("Peer 应已注入");
            let partial = peer.node.get().expect("循环路径上的 Node 应已创建");
            assert!(partial.peer.get().is_none());
        }
        Ok(())
    })?;
    Ok(())
}

/// 测试注册与解析并发进行
#[test]
fn test_concurrent_registration_and_resolution() {
    let container = DiContainerImpl::new();
    container.register::<Clock>();

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..100 {
                container.register::<OrderService>();
                container.remove_registration::<OrderService>();
            }
        });
        scope.spawn(|| {
            for _ in 0..100 {
                assert!(container.resolve::<Clock>().is_ok());
            }
        });
    });

    assert!(container.is_registered::<Clock>());
    assert!(!container.is_registered::<OrderService>());
}
