//! Mock 实现模块
//!
//! 提供锁后端和外部子系统的 Mock 实现，用于测试

pub mod backend;
pub mod subsystems;
