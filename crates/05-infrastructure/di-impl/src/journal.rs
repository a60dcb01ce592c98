//! 单例缓存日志
//!
//! 一次最外层解析期间新写入的单例缓存被记录在当前线程的日志帧中。
//! 解析成功时提交，失败时清除本次写入的全部缓存，避免循环依赖中
//! 注入未完成的实例残留在其他单例作用域里。

use di_abstractions::AnyInstance;
use parking_lot::Mutex;
use std::cell::RefCell;
use std::sync::Arc;
use tracing::debug;

/// 单例缓存槽
pub(crate) type InstanceSlot = Arc<Mutex<Option<AnyInstance>>>;

thread_local! {
    static FRAMES: RefCell<Vec<Vec<InstanceSlot>>> = RefCell::new(Vec::new());
}

/// 日志帧，未提交即被丢弃时回滚
#[must_use = "未提交的日志帧在丢弃时回滚"]
pub(crate) struct SingletonJournal {
    committed: bool,
}

/// 开始新的日志帧
pub(crate) fn begin() -> SingletonJournal {
    FRAMES.with(|frames| frames.borrow_mut().push(Vec::new()));
    SingletonJournal { committed: false }
}

/// 在最内层日志帧中记录新写入的缓存槽，没有日志帧时忽略
pub(crate) fn record(slot: &InstanceSlot) {
    FRAMES.with(|frames| {
        if let Some(frame) = frames.borrow_mut().last_mut() {
            frame.push(Arc::clone(slot));
        }
    });
}

impl SingletonJournal {
    /// 提交日志帧，保留本次写入的缓存
    pub fn commit(mut self) {
        self.committed = true;
        pop_frame();
    }
}

impl Drop for SingletonJournal {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        let slots = pop_frame();
        let mut rolled_back = 0;
        for slot in &slots {
            // 实例在锁外释放，其析构可能再次进入作用域
            let instance = slot.lock().take();
            if instance.is_some() {
                rolled_back += 1;
            }
        }
        if rolled_back > 0 {
            debug!("解析失败，回滚单例缓存 {} 项", rolled_back);
        }
    }
}

fn pop_frame() -> Vec<InstanceSlot> {
    FRAMES.with(|frames| frames.borrow_mut().pop()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_slot() -> InstanceSlot {
        let instance: AnyInstance = Arc::new(7_u32);
        Arc::new(Mutex::new(Some(instance)))
    }

    #[test]
    fn dropped_journal_clears_recorded_slots() {
        let slot = filled_slot();
        let untouched = filled_slot();
        {
            let _journal = begin();
            record(&slot);
        }
        assert!(slot.lock().is_none());
        assert!(untouched.lock().is_some());
    }

    #[test]
    fn committed_journal_keeps_recorded_slots() {
        let slot = filled_slot();
        let journal = begin();
        record(&slot);
        journal.commit();
        assert!(slot.lock().is_some());

        // 没有日志帧时记录被忽略
        record(&slot);
        drop(begin());
        assert!(slot.lock().is_some());
    }

    #[test]
    fn inner_frames_roll_back_independently() {
        let outer_slot = filled_slot();
        let inner_slot = filled_slot();
        let outer = begin();
        record(&outer_slot);
        {
            let _inner = begin();
            record(&inner_slot);
        }
        outer.commit();
        assert!(inner_slot.lock().is_none());
        assert!(outer_slot.lock().is_some());
    }
}
