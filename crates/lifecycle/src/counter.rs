//! 生命周期计数器
//!
//! 记录尚未配对的 `init()` 次数，并缓存本周期第一次启动的结果。
//!
//! # 状态
//!
//! - 空闲：`count == 0`，缓存结果无意义
//! - 活跃：`count >= 1`，缓存结果在计数从 0 变为 1 时写入，直到回到 0 之前保持不变
//!
//! # 顺序
//!
//! 启动顺序固定为 threads → crypto → sockets，遇到第一个失败即停止；
//! 关闭顺序为 sockets → crypto → threads。

use sync::{StaticLock, StaticMutex};

use crate::error::{InitError, Stage};
use crate::subsystems::Subsystems;

#[derive(Debug)]
pub(crate) struct LifecycleState {
    count: usize,
    cached: Result<(), InitError>,
}

impl LifecycleState {
    const IDLE: LifecycleState = LifecycleState {
        count: 0,
        cached: Ok(()),
    };

    fn enter(&mut self, subsystems: &dyn Subsystems) -> Result<(), InitError> {
        self.count += 1;
        if self.count > 1 {
            return self.cached;
        }

        self.cached = bring_up(subsystems);
        self.cached
    }

    fn leave(&mut self, subsystems: &dyn Subsystems) {
        match self.count {
            0 => {}
            1 => {
                self.count = 0;
                match core::mem::replace(&mut self.cached, Ok(())) {
                    Ok(()) => tear_down(subsystems),
                    Err(err) => log::debug!("lifecycle: skipping teardown after {err}"),
                }
            }
            _ => self.count -= 1,
        }
    }
}

/// 引用计数式的 init/finalize 状态机
///
/// 库使用一个全局实例，测试可以独立创建实例并注入自己的 [`Subsystems`]。
///
/// # 示例
/// ```
/// use lifecycle::{Lifecycle, RegisteredSubsystems};
///
/// static LIFECYCLE: Lifecycle = Lifecycle::new();
///
/// assert!(LIFECYCLE.init(&RegisteredSubsystems).is_ok());
/// assert_eq!(LIFECYCLE.count(), 1);
/// assert!(LIFECYCLE.finalize(&RegisteredSubsystems).is_ok());
/// assert_eq!(LIFECYCLE.count(), 0);
/// ```
#[derive(Debug)]
pub struct Lifecycle {
    pub(crate) state: StaticMutex<LifecycleState>,
}

impl Lifecycle {
    /// 创建处于空闲状态的计数器
    pub const fn new() -> Self {
        Self {
            state: StaticMutex::const_new(StaticLock::new(), LifecycleState::IDLE),
        }
    }

    /// 增加计数；计数从 0 变为 1 时执行启动并缓存结果
    ///
    /// 返回本周期缓存的启动结果。
    pub fn init(&self, subsystems: &dyn Subsystems) -> Result<(), InitError> {
        self.state.lock().enter(subsystems)
    }

    /// 减少计数；计数从 1 变为 0 时执行关闭
    ///
    /// 本周期启动失败时跳过全部关闭步骤。计数已为 0 时什么也不做。
    /// 关闭步骤尽力而为，总是返回成功。
    pub fn finalize(&self, subsystems: &dyn Subsystems) -> Result<(), InitError> {
        self.state.lock().leave(subsystems);
        Ok(())
    }

    /// 不获取静态锁的 [`init`](Self::init)，供库加载钩子使用
    ///
    /// # Safety
    /// 调用期间不能有其它线程访问此实例，包括持有其静态锁的线程
    pub unsafe fn init_unlocked(&self, subsystems: &dyn Subsystems) -> Result<(), InitError> {
        // SAFETY: 调用者保证独占访问
        unsafe { (*self.state.data_ptr()).enter(subsystems) }
    }

    /// 不获取静态锁的 [`finalize`](Self::finalize)，供库卸载钩子使用
    ///
    /// # Safety
    /// 同 [`init_unlocked`](Self::init_unlocked)
    pub unsafe fn finalize_unlocked(&self, subsystems: &dyn Subsystems) -> Result<(), InitError> {
        // SAFETY: 调用者保证独占访问
        unsafe { (*self.state.data_ptr()).leave(subsystems) };
        Ok(())
    }

    /// 当前计数
    pub fn count(&self) -> usize {
        self.state.lock().count
    }

    /// 当前周期缓存的启动结果，空闲时返回 `None`
    pub fn cached_result(&self) -> Option<Result<(), InitError>> {
        let state = self.state.lock();
        (state.count > 0).then_some(state.cached)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

fn bring_up(subsystems: &dyn Subsystems) -> Result<(), InitError> {
    let step = |stage: Stage, result: Result<(), i32>| {
        result.map_err(|code| {
            log::warn!("lifecycle: {stage} bring-up failed with status {code}");
            InitError { stage, code }
        })
    };

    log::debug!("lifecycle: bring-up started");
    step(Stage::Threads, subsystems.threads_init())?;
    step(Stage::Crypto, subsystems.crypto_init())?;
    step(Stage::Sockets, subsystems.socket_init())?;
    log::debug!("lifecycle: bring-up complete");
    Ok(())
}

fn tear_down(subsystems: &dyn Subsystems) {
    log::debug!("lifecycle: teardown started");
    subsystems.socket_cleanup();
    subsystems.crypto_finalize();
    // 加密子系统依赖线程子系统，必须最后关闭线程
    subsystems.threads_finalize();
    log::debug!("lifecycle: teardown complete");
}
