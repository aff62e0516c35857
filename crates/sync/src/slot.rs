//! 存放 `&'static dyn Trait` 的注册槽位
//!
//! 锁后端、加密和套接字子系统的注册都用它保存宿主提供的实现。

use core::sync::atomic::{AtomicPtr, Ordering};

/// 原子注册槽位
///
/// 胖指针本身放在一个泄漏的堆块里，槽位只保存指向它的细指针，
/// 因此一次原子读写就能取得完整的 `&'static T`。
/// 重新注册时旧的堆块不释放：并发的读者可能仍然持有它。
pub struct OpsSlot<T: ?Sized + 'static> {
    ptr: AtomicPtr<&'static T>,
}

impl<T: ?Sized + 'static> OpsSlot<T> {
    /// 创建空槽位
    pub const fn new() -> Self {
        Self {
            ptr: AtomicPtr::new(core::ptr::null_mut()),
        }
    }

    /// 写入实现
    pub fn store(&self, ops: &'static T) {
        let entry = Box::into_raw(Box::new(ops));
        self.ptr.store(entry, Ordering::Release);
    }

    /// 读取实现，未写入或已清空时返回 `None`
    pub fn load(&self) -> Option<&'static T> {
        let entry = self.ptr.load(Ordering::Acquire);
        if entry.is_null() {
            return None;
        }
        // SAFETY: entry 来自 store 中的 Box::into_raw，且永不释放
        Some(unsafe { *entry })
    }

    /// 清空槽位
    pub fn clear(&self) {
        self.ptr.store(core::ptr::null_mut(), Ordering::Release);
    }
}

impl<T: ?Sized + 'static> Default for OpsSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
