//! 同步原语
//!
//! 向库的其它模块提供可替换后端的互斥锁，以及线程子系统的启动与关闭。
//!
//! # 组件
//!
//! - [`LockBackend`] - 锁后端 trait（创建、销毁、加锁、解锁、线程标识）
//! - [`NoopBackend`] - 空后端，默认后端，所有操作直接成功
//! - [`PthreadBackend`] - 基于 pthread 错误检查型互斥锁的原生后端（unix）
//! - [`StaticLock`] / [`StaticMutex`] - 静态存储、无需堆分配的自举锁
//! - [`DynamicLock`] - 堆上分配、绑定后端的锁句柄
//! - [`OpsSlot`] - 后端及外部子系统实现的注册槽位
//!
//! # 后端选择
//!
//! 宿主程序可以在任何并发使用之前通过 [`register_lock_backend`] 注册自己的后端，
//! 未注册时使用 [`default_backend`]。
//!
//! # 错误处理
//!
//! 锁原语本身的失败（创建、销毁、加锁、解锁）以及空句柄都是致命错误，
//! 通过 [`fatal`] 终止进程，不会以 `Result` 的形式返回给调用者，
//! [`threads_init`] 的后端自检也不例外。

mod backend;
mod dynamic_lock;
mod error;
mod noop;
#[cfg(unix)]
mod pthread;
mod slot;
mod static_lock;
mod threads;

#[cfg(test)]
mod tests;

pub use backend::{
    LockBackend, RawLock, active_backend, active_backend_name, current_thread_id,
    default_backend, register_lock_backend,
};
pub use dynamic_lock::{
    DynamicLock, DynamicLockGuard, mutex_destroy, mutex_init, mutex_lock, mutex_unlock,
};
pub use error::{LockError, fatal};
pub use noop::{NOOP_THREAD_ID, NoopBackend, noop_backend};
#[cfg(unix)]
pub use pthread::{PthreadBackend, pthread_backend};
pub use slot::OpsSlot;
pub use static_lock::{StaticLock, StaticMutex, StaticMutexGuard};
pub use threads::{threads_finalize, threads_get_type, threads_init, threads_initialized};
