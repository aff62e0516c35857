//! 外部子系统操作 trait 定义和注册
//!
//! 加密和套接字子系统不属于本 crate，这里只定义它们在启动/关闭边界上的接口。
//! 宿主库需要实现这些 trait 并在启动前注册；未注册时使用总是成功的空实现。

use sync::OpsSlot;

/// 加密子系统操作
pub trait CryptoOps: Send + Sync {
    /// 启动加密子系统，失败时返回非零状态码
    fn crypto_init(&self) -> Result<(), i32>;

    /// 关闭加密子系统（尽力而为）
    fn crypto_finalize(&self);
}

/// 套接字子系统操作
pub trait SocketOps: Send + Sync {
    /// 启动套接字子系统，失败时返回非零状态码
    fn socket_init(&self) -> Result<(), i32>;

    /// 关闭套接字子系统（尽力而为）
    fn socket_cleanup(&self);
}

/// 未注册时使用的空实现
struct NoopOps;

impl CryptoOps for NoopOps {
    fn crypto_init(&self) -> Result<(), i32> {
        log::debug!("lifecycle: no CryptoOps registered, skipping crypto bring-up");
        Ok(())
    }

    fn crypto_finalize(&self) {}
}

impl SocketOps for NoopOps {
    fn socket_init(&self) -> Result<(), i32> {
        log::debug!("lifecycle: no SocketOps registered, skipping socket bring-up");
        Ok(())
    }

    fn socket_cleanup(&self) {}
}

static NOOP_OPS: NoopOps = NoopOps;

static CRYPTO_OPS: OpsSlot<dyn CryptoOps> = OpsSlot::new();
static SOCKET_OPS: OpsSlot<dyn SocketOps> = OpsSlot::new();

/// 注册加密子系统操作实现
///
/// # Safety
/// 必须在单线程环境下、任何 `init()` 之前调用
pub unsafe fn register_crypto_ops(ops: &'static dyn CryptoOps) {
    CRYPTO_OPS.store(ops);
}

/// 获取已注册的加密子系统操作实现，未注册时返回空实现
#[inline]
pub fn crypto_ops() -> &'static dyn CryptoOps {
    CRYPTO_OPS.load().unwrap_or(&NOOP_OPS)
}

/// 注册套接字子系统操作实现
///
/// # Safety
/// 必须在单线程环境下、任何 `init()` 之前调用
pub unsafe fn register_socket_ops(ops: &'static dyn SocketOps) {
    SOCKET_OPS.store(ops);
}

/// 获取已注册的套接字子系统操作实现，未注册时返回空实现
#[inline]
pub fn socket_ops() -> &'static dyn SocketOps {
    SOCKET_OPS.load().unwrap_or(&NOOP_OPS)
}
