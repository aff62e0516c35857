//! 空锁后端
//!
//! 所有操作都直接成功，适用于单线程或由外部负责同步的宿主程序。

use crate::backend::{LockBackend, RawLock};
use crate::error::LockError;

/// 空后端返回的固定线程标识
pub const NOOP_THREAD_ID: u64 = 1;

/// 空锁后端
#[derive(Debug)]
pub struct NoopBackend;

impl LockBackend for NoopBackend {
    fn name(&self) -> &'static str {
        "threads_noop"
    }

    fn mutex_init(&self, _lock: &mut RawLock) -> Result<(), LockError> {
        Ok(())
    }

    unsafe fn mutex_destroy(&self, _lock: &mut RawLock) -> Result<(), LockError> {
        Ok(())
    }

    unsafe fn mutex_lock(&self, _lock: RawLock) -> Result<(), LockError> {
        Ok(())
    }

    unsafe fn mutex_unlock(&self, _lock: RawLock) -> Result<(), LockError> {
        Ok(())
    }

    fn thread_id(&self) -> u64 {
        NOOP_THREAD_ID
    }
}

pub(crate) static NOOP_BACKEND: NoopBackend = NoopBackend;

/// 获取空锁后端
pub fn noop_backend() -> &'static dyn LockBackend {
    &NOOP_BACKEND
}
