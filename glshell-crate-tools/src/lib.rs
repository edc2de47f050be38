//! glshell 工具集
//!
//! 提供日志初始化与 panic hook，所有可执行程序在启动时先调用这两者。

pub mod init_log;
pub mod panic_hook;
