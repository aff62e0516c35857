//! 锁后端 trait 定义和注册
//!
//! 锁的具体实现由 [`LockBackend`] 描述。宿主程序可以通过 [`register_lock_backend`]
//! 提供自己的实现（例如已有线程运行时里的锁），未注册时回退到 [`default_backend`]。

use core::ffi::c_void;

use crate::error::LockError;
use crate::noop::NOOP_BACKEND;
use crate::slot::OpsSlot;

/// 后端私有的锁存储指针
///
/// 由 [`LockBackend::mutex_init`] 写入，[`LockBackend::mutex_destroy`] 释放并清空。
pub type RawLock = *mut c_void;

/// 锁后端
///
/// 提供互斥锁的创建、销毁、加锁、解锁以及当前线程标识查询。
/// 实现必须具有错误检查语义：持有者重复加锁返回 [`LockError::Deadlock`]，
/// 非持有者解锁返回 [`LockError::NotOwner`]。空后端除外，它的所有操作都是 no-op。
pub trait LockBackend: Send + Sync {
    /// 后端类型名
    fn name(&self) -> &'static str;

    /// 创建锁，并将存储指针写入 `lock`
    fn mutex_init(&self, lock: &mut RawLock) -> Result<(), LockError>;

    /// 销毁锁，释放存储并将 `lock` 置空
    ///
    /// # Safety
    /// `lock` 必须由本后端的 `mutex_init` 创建，且未被销毁、未被持有
    unsafe fn mutex_destroy(&self, lock: &mut RawLock) -> Result<(), LockError>;

    /// 加锁，阻塞直到获得锁
    ///
    /// # Safety
    /// `lock` 必须由本后端的 `mutex_init` 创建且尚未销毁
    unsafe fn mutex_lock(&self, lock: RawLock) -> Result<(), LockError>;

    /// 解锁
    ///
    /// # Safety
    /// `lock` 必须由本后端的 `mutex_init` 创建且尚未销毁
    unsafe fn mutex_unlock(&self, lock: RawLock) -> Result<(), LockError>;

    /// 当前线程标识
    fn thread_id(&self) -> u64;
}

impl core::fmt::Debug for dyn LockBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

static REGISTERED_BACKEND: OpsSlot<dyn LockBackend> = OpsSlot::new();

/// 注册宿主提供的锁后端
///
/// 已经创建的 [`DynamicLock`](crate::DynamicLock) 保留创建时的后端，不受之后的注册影响。
///
/// # Safety
/// 必须在任何并发使用锁之前调用；注册本身不做同步
pub unsafe fn register_lock_backend(backend: &'static dyn LockBackend) {
    if crate::threads::threads_initialized() {
        log::warn!(
            "sync: registering lock backend {} while thread subsystem is up",
            backend.name()
        );
    }
    REGISTERED_BACKEND.store(backend);
    log::info!("sync: lock backend {} registered", backend.name());
}

/// 获取默认锁后端（空后端），无需任何初始化即可使用
#[inline]
pub fn default_backend() -> &'static dyn LockBackend {
    &NOOP_BACKEND
}

/// 获取当前生效的锁后端
///
/// 已注册则返回注册的后端，否则返回 [`default_backend`]
#[inline]
pub fn active_backend() -> &'static dyn LockBackend {
    REGISTERED_BACKEND.load().unwrap_or_else(default_backend)
}

/// 当前生效的锁后端类型名
pub fn active_backend_name() -> &'static str {
    active_backend().name()
}

/// 通过当前生效的后端查询调用线程的标识
pub fn current_thread_id() -> u64 {
    active_backend().thread_id()
}
