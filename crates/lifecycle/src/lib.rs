//! 库初始化与清理
//!
//! 提供引用计数式的 [`init`] / [`finalize`]：无论应用程序（或加载器）调用多少次、
//! 是否从多个线程并发调用，子系统都只在计数从 0 变为 1 时启动一次，
//! 在计数从 1 回到 0 时关闭一次。
//!
//! # 组件
//!
//! - [`Lifecycle`] - 计数器状态机，由 `sync` 的 [`StaticLock`](sync::StaticLock) 串行化
//! - [`Subsystems`] - 启动/关闭步骤接口，生产实现为 [`RegisteredSubsystems`]
//! - [`CryptoOps`] / [`SocketOps`] - 外部子系统接口，由宿主库注册
//! - [`hooks`] - 库加载/卸载钩子
//!
//! # 错误处理
//!
//! 外部子系统启动失败是可恢复的：结果缓存为 [`InitError`]，本周期内每个 `init()`
//! 调用者都会拿到它，计数回到 0 之后的下一次 `init()` 会重新尝试。
//! 锁本身的失败不会出现在这里，`sync` 会直接终止进程。

mod counter;
mod error;
pub mod hooks;
mod ops;
mod subsystems;

#[cfg(test)]
mod tests;

pub use counter::Lifecycle;
pub use error::{InitError, Stage, status_of};
pub use ops::{CryptoOps, SocketOps, crypto_ops, register_crypto_ops, register_socket_ops, socket_ops};
pub use subsystems::{RegisteredSubsystems, Subsystems};

/// 全局生命周期实例
///
/// 显式调用和加载钩子共用此实例。
static GLOBAL_LIFECYCLE: Lifecycle = Lifecycle::new();

/// 初始化库
///
/// 可以调用任意多次，每次调用都应与一次 [`finalize`] 配对。
/// 已经初始化时不会重复启动子系统，而是返回本周期第一次启动的结果。
pub fn init() -> Result<(), InitError> {
    GLOBAL_LIFECYCLE.init(&RegisteredSubsystems)
}

/// 清理库
///
/// 与 [`init`] 配对；最后一次配对的调用关闭全部子系统。
/// 从未初始化时调用也是安全的。
pub fn finalize() -> Result<(), InitError> {
    GLOBAL_LIFECYCLE.finalize(&RegisteredSubsystems)
}

/// 尚未配对的 `init()` 次数
pub fn init_count() -> usize {
    GLOBAL_LIFECYCLE.count()
}

/// 库当前是否处于已初始化周期内
pub fn is_initialized() -> bool {
    init_count() > 0
}

/// 本周期缓存的启动结果，未初始化时返回 `None`
pub fn init_result() -> Option<Result<(), InitError>> {
    GLOBAL_LIFECYCLE.cached_result()
}
