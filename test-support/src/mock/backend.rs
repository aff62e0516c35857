//! 锁后端的 Mock 实现
//!
//! 注意：这里不直接依赖 `sync` crate（避免循环依赖）。
//! `sync` crate 在 `cfg(test)` 下为这些类型实现其 trait（例如 `LockBackend`）。

use core::ffi::c_void;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Lock,
    Unlock,
    Destroy,
}

/// Mock 的锁后端
///
/// 每把锁分配一块永不释放的存储，并按存储地址记录加锁、解锁、销毁事件。
pub struct MockLockBackend {
    events: Mutex<Vec<(usize, Event)>>,
}

impl MockLockBackend {
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// 分配一块唯一的锁存储
    pub fn create(&self) -> *mut c_void {
        let storage: &'static mut u64 = Box::leak(Box::new(0));
        (storage as *mut u64).cast()
    }

    pub fn destroy(&self, lock: *mut c_void) {
        self.push(lock, Event::Destroy);
    }

    pub fn record_lock(&self, lock: *mut c_void) {
        self.push(lock, Event::Lock);
    }

    pub fn record_unlock(&self, lock: *mut c_void) {
        self.push(lock, Event::Unlock);
    }

    pub fn locks_on(&self, lock: *mut c_void) -> usize {
        self.count(lock, Event::Lock)
    }

    pub fn unlocks_on(&self, lock: *mut c_void) -> usize {
        self.count(lock, Event::Unlock)
    }

    pub fn was_destroyed(&self, lock: *mut c_void) -> bool {
        self.count(lock, Event::Destroy) > 0
    }

    fn push(&self, lock: *mut c_void, event: Event) {
        self.events.lock().unwrap().push((lock as usize, event));
    }

    fn count(&self, lock: *mut c_void, event: Event) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|&&(addr, e)| addr == lock as usize && e == event)
            .count()
    }
}

impl Default for MockLockBackend {
    fn default() -> Self {
        Self::new()
    }
}
