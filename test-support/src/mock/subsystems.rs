//! 外部子系统的 Mock 实现
//!
//! 注意：这里不直接依赖 `lifecycle` crate（避免循环依赖）。
//! `lifecycle` crate 在 `cfg(test)` 下为这些类型实现其 trait（例如 `Subsystems`）。

use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::time::Duration;

/// 子系统调用名，与 Mock 记录的调用序列一致
pub const THREADS_INIT: &str = "threads_init";
pub const CRYPTO_INIT: &str = "crypto_init";
pub const SOCKET_INIT: &str = "socket_init";
pub const SOCKET_CLEANUP: &str = "socket_cleanup";
pub const CRYPTO_FINALIZE: &str = "crypto_finalize";
pub const THREADS_FINALIZE: &str = "threads_finalize";

/// 一个干净周期内完整的调用序列
pub const CLEAN_EPOCH: [&str; 6] = [
    THREADS_INIT,
    CRYPTO_INIT,
    SOCKET_INIT,
    SOCKET_CLEANUP,
    CRYPTO_FINALIZE,
    THREADS_FINALIZE,
];

/// Mock 的子系统集合
///
/// 按顺序记录每次调用；三个启动步骤的返回码可单独设置（0 表示成功）。
pub struct MockSubsystems {
    calls: Mutex<Vec<&'static str>>,
    threads_status: AtomicI32,
    crypto_status: AtomicI32,
    socket_status: AtomicI32,
    bring_up_delay_ms: AtomicU64,
}

impl MockSubsystems {
    pub const fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            threads_status: AtomicI32::new(0),
            crypto_status: AtomicI32::new(0),
            socket_status: AtomicI32::new(0),
            bring_up_delay_ms: AtomicU64::new(0),
        }
    }

    /// 设置 threads_init 的返回码
    pub fn fail_threads(&self, status: i32) {
        self.threads_status.store(status, Ordering::SeqCst);
    }

    /// 设置 crypto_init 的返回码
    pub fn fail_crypto(&self, status: i32) {
        self.crypto_status.store(status, Ordering::SeqCst);
    }

    /// 设置 socket_init 的返回码
    pub fn fail_socket(&self, status: i32) {
        self.socket_status.store(status, Ordering::SeqCst);
    }

    /// threads_init 中额外等待的时间，用于放大并发竞争窗口
    pub fn set_bring_up_delay(&self, delay: Duration) {
        self.bring_up_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// 记录一次调用
    pub fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    /// 记录一次启动步骤调用并返回预设的返回码
    pub fn record_init(&self, call: &'static str) -> i32 {
        self.record(call);
        match call {
            THREADS_INIT => {
                let delay = self.bring_up_delay_ms.load(Ordering::SeqCst);
                if delay > 0 {
                    std::thread::sleep(Duration::from_millis(delay));
                }
                self.threads_status.load(Ordering::SeqCst)
            }
            CRYPTO_INIT => self.crypto_status.load(Ordering::SeqCst),
            SOCKET_INIT => self.socket_status.load(Ordering::SeqCst),
            _ => 0,
        }
    }

    /// 到目前为止的调用序列
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// 某个调用出现的次数
    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|&&c| c == call).count()
    }

    /// 清空调用记录
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Default for MockSubsystems {
    fn default() -> Self {
        Self::new()
    }
}
