//! 静态锁
//!
//! 存储位于静态内存、编译期初始化的错误检查型互斥锁。它不依赖堆分配，
//! 也不依赖锁后端，因此可以保护"锁后端是否已经可用"这类自举状态。
//!
//! 争用时先自旋，再让出 CPU，最后按指数退避短暂睡眠。没有等待队列，
//! 因此释放后由哪个等待者拿到锁不确定，唤醒延迟最多为一个退避间隔。

use core::hint;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lock_api::{GuardSend, RawMutex};

use crate::error::{LockError, fatal};

/// 空闲状态下的持有者标记
const UNOWNED: usize = 0;

/// 让出 CPU 前的自旋次数
const SPIN_LIMIT: u32 = 64;

/// 开始睡眠前让出 CPU 的次数
const YIELD_LIMIT: u32 = 16;

const MIN_BACKOFF: Duration = Duration::from_micros(50);
const MAX_BACKOFF: Duration = Duration::from_millis(1);

static NEXT_THREAD_TOKEN: AtomicUsize = AtomicUsize::new(1);

std::thread_local! {
    static THREAD_TOKEN: usize = NEXT_THREAD_TOKEN.fetch_add(1, Ordering::Relaxed);
}

/// 当前线程的持有者标记，非零且在进程内唯一
fn thread_token() -> usize {
    THREAD_TOKEN.with(|token| *token)
}

/// 静态锁
///
/// 不可重入：持有者再次加锁、非持有者解锁都会终止进程。
/// 通常通过 [`StaticMutex`] 使用。
///
/// # 示例
/// ```
/// use sync::StaticMutex;
///
/// static COUNTER: StaticMutex<usize> = StaticMutex::const_new(sync::StaticLock::new(), 0);
///
/// *COUNTER.lock() += 1;
/// assert_eq!(*COUNTER.lock(), 1);
/// ```
#[derive(Debug)]
pub struct StaticLock {
    owner: AtomicUsize,
}

impl StaticLock {
    /// 创建一个静态锁，初始化在编译期完成，不会失败
    pub const fn new() -> Self {
        StaticLock {
            owner: AtomicUsize::new(UNOWNED),
        }
    }

    /// 当前线程是否持有此锁
    pub fn is_held_by_current_thread(&self) -> bool {
        self.owner.load(Ordering::Relaxed) == thread_token()
    }
}

impl Default for StaticLock {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl RawMutex for StaticLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: StaticLock = StaticLock::new();

    type GuardMarker = GuardSend;

    fn lock(&self) {
        let me = thread_token();
        if self.owner.load(Ordering::Relaxed) == me {
            fatal("static lock", LockError::Deadlock);
        }

        let mut spins = 0;
        let mut yields = 0;
        let mut backoff = MIN_BACKOFF;
        while self
            .owner
            .compare_exchange_weak(UNOWNED, me, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            if spins < SPIN_LIMIT {
                spins += 1;
                hint::spin_loop();
            } else if yields < YIELD_LIMIT {
                yields += 1;
                std::thread::yield_now();
            } else {
                // 持有者可能在做耗时的启动工作，不再空转
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.owner
            .compare_exchange(UNOWNED, thread_token(), Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        if self
            .owner
            .compare_exchange(thread_token(), UNOWNED, Ordering::Release, Ordering::Relaxed)
            .is_err()
        {
            fatal("static unlock", LockError::NotOwner);
        }
    }

    fn is_locked(&self) -> bool {
        self.owner.load(Ordering::Relaxed) != UNOWNED
    }
}

/// 由 [`StaticLock`] 保护的数据
pub type StaticMutex<T> = lock_api::Mutex<StaticLock, T>;

/// [`StaticMutex`] 的 RAII 保护器
pub type StaticMutexGuard<'a, T> = lock_api::MutexGuard<'a, StaticLock, T>;
