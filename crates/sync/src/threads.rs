//! 线程子系统的启动与关闭
//!
//! [`threads_init`] 选定本次使用的锁后端（已注册的或默认的），并用它完成一次
//! 创建-加锁-解锁-销毁的自检；[`threads_finalize`] 清除该记录。

use crate::backend::{LockBackend, RawLock, active_backend};
use crate::error::{LockError, fatal};
use crate::slot::OpsSlot;

static BACKEND_IN_USE: OpsSlot<dyn LockBackend> = OpsSlot::new();

/// 用后端走一遍完整的锁生命周期，任何一步失败都终止进程
fn self_test(backend: &dyn LockBackend) {
    let mut lock: RawLock = core::ptr::null_mut();
    if let Err(err) = backend.mutex_init(&mut lock) {
        fatal("threads_init: mutex_init", err);
    }
    // SAFETY: lock 刚由同一后端创建，且只在本函数内使用
    if let Err(err) = unsafe { backend.mutex_lock(lock) } {
        fatal("threads_init: mutex_lock", err);
    }
    if let Err(err) = unsafe { backend.mutex_unlock(lock) } {
        fatal("threads_init: mutex_unlock", err);
    }
    if let Err(err) = unsafe { backend.mutex_destroy(&mut lock) } {
        fatal("threads_init: mutex_destroy", err);
    }
}

/// 启动线程子系统
///
/// 锁原语失败不会返回：后端自检中的任何错误都直接终止进程。
/// 返回值保留给启动步骤的状态约定，目前总是 `Ok`。
pub fn threads_init() -> Result<(), LockError> {
    let backend = active_backend();
    self_test(backend);
    BACKEND_IN_USE.store(backend);
    log::debug!("sync: thread subsystem up with {}", backend.name());
    Ok(())
}

/// 关闭线程子系统
pub fn threads_finalize() {
    if let Some(backend) = BACKEND_IN_USE.load() {
        log::debug!("sync: thread subsystem down ({})", backend.name());
    }
    BACKEND_IN_USE.clear();
}

/// 线程子系统正在使用的后端类型名，未启动时返回 `None`
pub fn threads_get_type() -> Option<&'static str> {
    BACKEND_IN_USE.load().map(|backend| backend.name())
}

/// 线程子系统是否已启动
pub fn threads_initialized() -> bool {
    BACKEND_IN_USE.load().is_some()
}
