//! 进程级共享容器

use crate::container::DiContainerImpl;
use infrastructure_common::ContainerConfig;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

static SHARED_CONTAINER: OnceCell<Arc<DiContainerImpl>> = OnceCell::new();

/// 获取进程级共享容器
///
/// 首次访问时使用默认配置创建，并发首次访问也只会创建一个实例。
pub fn shared_container() -> Arc<DiContainerImpl> {
    Arc::clone(SHARED_CONTAINER.get_or_init(|| {
        let container = DiContainerImpl::new();
        info!("创建共享容器: {}", container.id());
        Arc::new(container)
    }))
}

/// 使用指定配置初始化共享容器
///
/// 共享容器已存在时不做修改，以 `Err` 返回已有的容器。
pub fn init_shared_container(config: ContainerConfig) -> Result<Arc<DiContainerImpl>, Arc<DiContainerImpl>> {
    let mut created = false;
    let container = SHARED_CONTAINER.get_or_init(|| {
        created = true;
        let container = DiContainerImpl::with_config(config);
        info!("创建共享容器: {}", container.id());
        Arc::new(container)
    });

    if created {
        Ok(Arc::clone(container))
    } else {
        Err(Arc::clone(container))
    }
}
