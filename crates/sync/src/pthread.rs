//! 基于 pthread 的锁后端
//!
//! 使用 `PTHREAD_MUTEX_ERRORCHECK` 类型的互斥锁：持有者重复加锁返回 `EDEADLK`，
//! 非持有者解锁返回 `EPERM`，不会静默成功。锁存储在堆上分配，销毁时释放。
//! 属性设置或互斥锁构造失败时没有可用的锁，直接终止进程。

use core::mem::MaybeUninit;

use crate::backend::{LockBackend, RawLock};
use crate::error::{LockError, fatal};

/// pthread 锁后端
#[derive(Debug)]
pub struct PthreadBackend;

/// 在 `attr` 中构造错误检查型互斥锁的属性
fn init_errorcheck_attr(attr: &mut MaybeUninit<libc::pthread_mutexattr_t>) {
    // SAFETY: attr 指向有效的未初始化存储
    let rc = unsafe { libc::pthread_mutexattr_init(attr.as_mut_ptr()) };
    if rc != 0 {
        fatal("pthread_mutexattr_init", LockError::from_errno(rc));
    }

    // SAFETY: attr 已由 pthread_mutexattr_init 初始化
    let rc =
        unsafe { libc::pthread_mutexattr_settype(attr.as_mut_ptr(), libc::PTHREAD_MUTEX_ERRORCHECK) };
    if rc != 0 {
        fatal("pthread_mutexattr_settype", LockError::from_errno(rc));
    }
}

impl LockBackend for PthreadBackend {
    fn name(&self) -> &'static str {
        "threads_pthread"
    }

    fn mutex_init(&self, lock: &mut RawLock) -> Result<(), LockError> {
        let mut attr = MaybeUninit::<libc::pthread_mutexattr_t>::uninit();
        init_errorcheck_attr(&mut attr);
        let storage = Box::into_raw(Box::new(MaybeUninit::<libc::pthread_mutex_t>::uninit()));

        // SAFETY: storage 指向刚分配的存储，attr 已初始化
        let rc = unsafe {
            libc::pthread_mutex_init(storage.cast::<libc::pthread_mutex_t>(), attr.as_ptr())
        };
        // SAFETY: attr 已初始化且不再使用
        unsafe { libc::pthread_mutexattr_destroy(attr.as_mut_ptr()) };

        if rc != 0 {
            fatal("pthread_mutex_init", LockError::from_errno(rc));
        }

        *lock = storage.cast();
        Ok(())
    }

    unsafe fn mutex_destroy(&self, lock: &mut RawLock) -> Result<(), LockError> {
        if lock.is_null() {
            return Err(LockError::InvalidArgument);
        }
        let storage = lock.cast::<MaybeUninit<libc::pthread_mutex_t>>();

        // SAFETY: 调用者保证 lock 由 mutex_init 创建且未被持有
        let rc = unsafe { libc::pthread_mutex_destroy(storage.cast::<libc::pthread_mutex_t>()) };
        // SAFETY: storage 来自 mutex_init 中的 Box::into_raw
        drop(unsafe { Box::from_raw(storage) });
        *lock = core::ptr::null_mut();

        LockError::check(rc)
    }

    unsafe fn mutex_lock(&self, lock: RawLock) -> Result<(), LockError> {
        if lock.is_null() {
            return Err(LockError::InvalidArgument);
        }
        // SAFETY: 调用者保证 lock 指向已初始化的互斥锁
        LockError::check(unsafe { libc::pthread_mutex_lock(lock.cast()) })
    }

    unsafe fn mutex_unlock(&self, lock: RawLock) -> Result<(), LockError> {
        if lock.is_null() {
            return Err(LockError::InvalidArgument);
        }
        // SAFETY: 调用者保证 lock 指向已初始化的互斥锁
        LockError::check(unsafe { libc::pthread_mutex_unlock(lock.cast()) })
    }

    fn thread_id(&self) -> u64 {
        // SAFETY: pthread_self 总是成功
        unsafe { libc::pthread_self() as u64 }
    }
}

pub(crate) static PTHREAD_BACKEND: PthreadBackend = PthreadBackend;

/// 获取 pthread 锁后端
pub fn pthread_backend() -> &'static dyn LockBackend {
    &PTHREAD_BACKEND
}
