//! # 统一错误处理模块
//!
//! 定义 audacity-batch 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// audacity-batch 统一错误类型
#[derive(Error, Debug)]
pub enum BatchError {
    // ─────────────────────────────────────────────────────────────
    // 输入错误
    // ─────────────────────────────────────────────────────────────
    #[error("The specified directory does not exist: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Failed to read directory {path}: {source}")]
    DirectoryReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {path}\nReason: {reason}")]
    ConfigParse { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 进程错误
    // ─────────────────────────────────────────────────────────────
    #[error("Process enumeration is not available: {0}")]
    ProcessEnumeration(String),

    #[error("Failed to launch {path}: {source}")]
    LaunchFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 管道错误
    // ─────────────────────────────────────────────────────────────
    #[error("Could not open script pipe {path} after {attempts} attempts: {source}\nIs Audacity running with mod-script-pipe enabled?")]
    PipeConnect {
        path: String,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("Script pipe I/O failed: {source}")]
    PipeIo {
        #[source]
        source: std::io::Error,
    },

    #[error("Script pipe closed before a response to '{command}' arrived")]
    PipeClosed { command: String },

    // ─────────────────────────────────────────────────────────────
    // 远程命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("Remote command failed: {command}\n{response}")]
    RemoteCommandFailed { command: String, response: String },

    #[error("Parameter '{key}' of command '{command}' contains a quote or line break")]
    InvalidParameter { command: String, key: String },

    // ─────────────────────────────────────────────────────────────
    // 批处理
    // ─────────────────────────────────────────────────────────────
    #[error("{failed} of {total} files failed")]
    BatchFailed { failed: usize, total: usize },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, BatchError>;
