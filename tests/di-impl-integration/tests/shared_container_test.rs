//! 进程级共享容器测试
//!
//! 共享容器在进程内只能创建一次，因此所有断言放在同一个测试中。

use di_abstractions::{DiContainer, Injectable, ResolverExt};
use di_impl::{init_shared_container, shared_container};
use infrastructure_common::{ContainerConfig, Lifetime};
use std::sync::{Arc, Barrier};
use std::thread;

struct Settings;

impl Injectable for Settings {
    fn create() -> Self {
        Settings
    }
}

#[test]
fn test_shared_container_is_created_once() {
    let barrier = &Barrier::new(8);
    let containers: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    shared_container()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("访问线程不应崩溃"))
            .collect()
    });

    for container in &containers {
        assert!(Arc::ptr_eq(container, &containers[0]));
    }

    // 已经存在时不会替换
    let config = ContainerConfig::default().with_default_lifetime(Lifetime::Transient);
    let existing = init_shared_container(config).expect_err("共享容器已存在");
    assert!(Arc::ptr_eq(&existing, &containers[0]));
    assert_eq!(existing.config().default_lifetime, Lifetime::Singleton);

    // 注册对所有访问者可见
    shared_container().register::<Settings>();
    assert!(containers[0].resolve::<Settings>().is_ok());
}
