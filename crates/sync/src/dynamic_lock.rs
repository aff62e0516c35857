//! 动态锁
//!
//! 堆上分配、按需创建和销毁的锁句柄，所有操作委托给锁后端。
//! 任何操作失败或传入空句柄都会终止进程，不会作为错误返回给调用者。

use crate::backend::{LockBackend, RawLock, active_backend};
use crate::error::{LockError, fatal};

/// 动态锁句柄
///
/// 创建时绑定当时生效的锁后端，之后的 lock/unlock/destroy 都使用同一个后端。
/// 句柄在 drop 时销毁底层锁，销毁恰好发生一次。
///
/// # 示例
/// ```
/// let lock = sync::DynamicLock::new();
/// {
///     let _guard = lock.lock();
///     // 临界区代码
/// }
/// ```
#[derive(Debug)]
pub struct DynamicLock {
    raw: RawLock,
    backend: &'static dyn LockBackend,
}

// Safety: 后端实现为 Send + Sync，锁存储本身就是为跨线程访问设计的
unsafe impl Send for DynamicLock {}
unsafe impl Sync for DynamicLock {}

impl DynamicLock {
    /// 使用当前生效的后端创建锁
    pub fn new() -> Self {
        Self::with_backend(active_backend())
    }

    /// 使用指定后端创建锁
    pub fn with_backend(backend: &'static dyn LockBackend) -> Self {
        let mut raw: RawLock = core::ptr::null_mut();
        if let Err(err) = backend.mutex_init(&mut raw) {
            fatal("mutex init", err);
        }
        DynamicLock { raw, backend }
    }

    /// 加锁并返回 RAII 保护器
    pub fn lock(&self) -> DynamicLockGuard<'_> {
        self.acquire();
        DynamicLockGuard { lock: self }
    }

    /// 创建此锁的后端类型名
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    fn acquire(&self) {
        // SAFETY: raw 由 self.backend 创建，且在 drop 之前不会被销毁
        if let Err(err) = unsafe { self.backend.mutex_lock(self.raw) } {
            fatal("mutex lock", err);
        }
    }

    fn release(&self) {
        // SAFETY: 同 acquire
        if let Err(err) = unsafe { self.backend.mutex_unlock(self.raw) } {
            fatal("mutex unlock", err);
        }
    }
}

impl Default for DynamicLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DynamicLock {
    fn drop(&mut self) {
        // SAFETY: raw 由 self.backend 创建，drop 只发生一次
        if let Err(err) = unsafe { self.backend.mutex_destroy(&mut self.raw) } {
            fatal("mutex destroy", err);
        }
    }
}

/// 离开作用域时自动解锁的保护器
pub struct DynamicLockGuard<'a> {
    lock: &'a DynamicLock,
}

impl Drop for DynamicLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

// ========== 句柄式接口 ==========
//
// 供不便使用 RAII 保护器的调用方显式加解锁。`None` 表示空句柄。

fn require<T>(lock: Option<T>, what: &str) -> T {
    match lock {
        Some(lock) => lock,
        None => fatal(what, LockError::InvalidArgument),
    }
}

/// 创建动态锁，等同于 [`DynamicLock::new`]
pub fn mutex_init() -> DynamicLock {
    DynamicLock::new()
}

/// 显式加锁，需与 [`mutex_unlock`] 配对
pub fn mutex_lock(lock: Option<&DynamicLock>) {
    require(lock, "mutex lock").acquire();
}

/// 显式解锁
pub fn mutex_unlock(lock: Option<&DynamicLock>) {
    require(lock, "mutex unlock").release();
}

/// 销毁动态锁
pub fn mutex_destroy(lock: Option<DynamicLock>) {
    drop(require(lock, "mutex destroy"));
}
