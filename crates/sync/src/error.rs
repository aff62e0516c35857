//! 锁错误类型
//!
//! 定义了锁后端可能返回的错误，可通过 [`LockError::to_errno()`] 与 POSIX errno 互相转换。

use core::fmt;

/// 锁操作错误
///
/// 各错误码对应标准 POSIX errno 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockError {
    /// 持有者再次加锁 (EDEADLK)
    Deadlock,
    /// 非持有者解锁 (EPERM)
    NotOwner,
    /// 无法分配锁存储 (ENOMEM)
    OutOfMemory,
    /// 无效的锁句柄 (EINVAL)
    InvalidArgument,
    /// 锁仍被占用 (EBUSY)
    Busy,
    /// 其它操作系统错误码
    Os(i32),
}

impl LockError {
    /// 从 errno 构造错误
    pub fn from_errno(errno: i32) -> Self {
        match errno {
            libc::EDEADLK => LockError::Deadlock,
            libc::EPERM => LockError::NotOwner,
            libc::ENOMEM => LockError::OutOfMemory,
            libc::EINVAL => LockError::InvalidArgument,
            libc::EBUSY => LockError::Busy,
            other => LockError::Os(other),
        }
    }

    /// 转换为 errno（正数）
    pub fn to_errno(&self) -> i32 {
        match self {
            LockError::Deadlock => libc::EDEADLK,
            LockError::NotOwner => libc::EPERM,
            LockError::OutOfMemory => libc::ENOMEM,
            LockError::InvalidArgument => libc::EINVAL,
            LockError::Busy => libc::EBUSY,
            LockError::Os(errno) => *errno,
        }
    }

    /// 将 pthread 风格的返回码转换为 `Result`
    pub(crate) fn check(rc: i32) -> Result<(), LockError> {
        if rc == 0 {
            Ok(())
        } else {
            Err(LockError::from_errno(rc))
        }
    }
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Deadlock => write!(f, "lock already held by calling thread"),
            LockError::NotOwner => write!(f, "lock not held by calling thread"),
            LockError::OutOfMemory => write!(f, "out of memory for lock storage"),
            LockError::InvalidArgument => write!(f, "invalid lock handle"),
            LockError::Busy => write!(f, "lock is busy"),
            LockError::Os(errno) => write!(f, "os error {errno}"),
        }
    }
}

impl std::error::Error for LockError {}

/// 锁原语失败时终止进程
///
/// 锁本身不可用时，任何临界区都不再可信，因此不返回错误而是直接 abort。
#[cold]
pub fn fatal(what: &str, err: LockError) -> ! {
    log::error!("sync: {what} failed: {err} (errno {}), aborting", err.to_errno());
    std::process::abort()
}
