//! 注入守卫
//!
//! 每个线程维护一个正在生成实例的注册项栈。注册项再次出现在自己的
//! 注入路径上时说明存在循环依赖，此时跳过注入以保证解析终止。

use crate::table::EntryId;
use infrastructure_common::{ResolveError, TypeInfo};
use std::cell::RefCell;
use uuid::Uuid;

thread_local! {
    static ACTIVE_ENTRIES: RefCell<Vec<GuardKey>> = RefCell::new(Vec::new());
}

/// 守卫栈中的键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GuardKey {
    pub container: Uuid,
    pub entry: EntryId,
}

/// 进入守卫的结果
#[derive(Debug)]
pub(crate) enum GuardEntry {
    /// 首次进入，离开作用域时出栈
    Entered(InjectionGuard),
    /// 注册项已在栈中
    Reentered,
}

impl GuardEntry {
    /// 是否需要执行依赖注入
    pub fn perform_injection(&self) -> bool {
        matches!(self, Self::Entered(_))
    }
}

/// 入栈的守卫，drop 时出栈
#[derive(Debug)]
pub(crate) struct InjectionGuard {
    key: GuardKey,
}

impl Drop for InjectionGuard {
    fn drop(&mut self) {
        // 线程结束时的析构顺序不确定，栈已销毁则无需处理
        let _ = ACTIVE_ENTRIES.try_with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(position) = stack.iter().rposition(|key| *key == self.key) {
                stack.remove(position);
            }
        });
    }
}

/// 进入注入守卫
///
/// 注册项已在栈中时返回 [`GuardEntry::Reentered`]，不入栈。
/// 否则检查当前容器在本线程的解析深度，未超出 `max_depth` 时入栈。
pub(crate) fn enter(key: GuardKey, max_depth: usize, type_info: TypeInfo) -> Result<GuardEntry, ResolveError> {
    ACTIVE_ENTRIES.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.contains(&key) {
            return Ok(GuardEntry::Reentered);
        }

        let depth = stack
            .iter()
            .filter(|active| active.container == key.container)
            .count();
        if depth >= max_depth {
            return Err(ResolveError::DepthExceeded {
                type_info,
                depth: max_depth,
            });
        }

        stack.push(key);
        Ok(GuardEntry::Entered(InjectionGuard { key }))
    })
}

/// 当前线程中某容器的解析深度
pub(crate) fn depth(container: Uuid) -> usize {
    ACTIVE_ENTRIES.with(|stack| {
        stack
            .borrow()
            .iter()
            .filter(|active| active.container == container)
            .count()
    })
}
