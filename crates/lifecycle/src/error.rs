//! 启动错误类型

use core::fmt;

/// 启动步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 线程子系统
    Threads,
    /// 加密子系统
    Crypto,
    /// 套接字子系统
    Sockets,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Threads => "threads",
            Stage::Crypto => "crypto",
            Stage::Sockets => "sockets",
        };
        f.write_str(name)
    }
}

/// 启动失败
///
/// 记录失败的步骤和该步骤返回的状态码。同一周期内的所有 `init()` 调用者
/// 都会拿到同一个值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitError {
    /// 失败的步骤
    pub stage: Stage,
    /// 步骤返回的状态码
    pub code: i32,
}

impl InitError {
    /// 转换为非零状态码
    ///
    /// 步骤自身报告的码为 0 时返回 -1，保证结果总是表示失败。
    pub fn to_status(&self) -> i32 {
        if self.code == 0 { -1 } else { self.code }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bring-up failed with status {}", self.stage, self.code)
    }
}

impl std::error::Error for InitError {}

/// 将 `Result` 形式的启动结果转换为状态码，成功为 0
pub fn status_of(result: Result<(), InitError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => err.to_status(),
    }
}
