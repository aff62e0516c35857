//! 启动/关闭步骤
//!
//! [`Subsystems`] 把三个子系统的启动和关闭抽象成一个接口，[`Lifecycle`](crate::Lifecycle)
//! 只通过它按固定顺序调用各步骤。生产环境使用 [`RegisteredSubsystems`]。

use crate::ops::{crypto_ops, socket_ops};

/// 三个子系统的启动/关闭步骤
///
/// 启动步骤失败时返回非零状态码；关闭步骤尽力而为，不返回状态。
pub trait Subsystems {
    /// 启动线程子系统
    fn threads_init(&self) -> Result<(), i32>;
    /// 启动加密子系统
    fn crypto_init(&self) -> Result<(), i32>;
    /// 启动套接字子系统
    fn socket_init(&self) -> Result<(), i32>;
    /// 关闭套接字子系统
    fn socket_cleanup(&self);
    /// 关闭加密子系统
    fn crypto_finalize(&self);
    /// 关闭线程子系统
    fn threads_finalize(&self);
}

/// 委托给 `sync` 的线程子系统以及已注册的加密、套接字实现
#[derive(Debug, Default, Clone, Copy)]
pub struct RegisteredSubsystems;

impl Subsystems for RegisteredSubsystems {
    fn threads_init(&self) -> Result<(), i32> {
        sync::threads_init().map_err(|err| -err.to_errno())
    }

    fn crypto_init(&self) -> Result<(), i32> {
        crypto_ops().crypto_init()
    }

    fn socket_init(&self) -> Result<(), i32> {
        socket_ops().socket_init()
    }

    fn socket_cleanup(&self) {
        socket_ops().socket_cleanup();
    }

    fn crypto_finalize(&self) {
        crypto_ops().crypto_finalize();
    }

    fn threads_finalize(&self) {
        sync::threads_finalize();
    }
}
