//! # 远程控制模块
//!
//! 通过 Audacity 的 mod-script-pipe 发送脚本命令。
//!
//! ## 功能
//! - 命令建模与编码 (`command`)
//! - 命名管道客户端 (`pipe`)
//! - 连接重试与退避 (`retry`)
//! - 仅打印命令的 dry-run 通道 (`dry_run`)
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/batch.rs` 使用
//! - 使用 `log` 记录线上收发内容

pub mod command;
pub mod dry_run;
pub mod pipe;
pub mod retry;

pub use command::RemoteCommand;
pub use dry_run::DryRunChannel;
pub use pipe::{PipeChannel, PipePaths};
pub use retry::RetryPolicy;

use crate::error::{BatchError, Result};

/// 命令执行结束时 Audacity 输出的状态行前缀
const STATUS_PREFIX: &str = "BatchCommand finished:";

/// 同步执行远程命令的通道
pub trait CommandChannel {
    /// 发送一条命令并等待完整响应
    fn execute(&mut self, command: &RemoteCommand) -> Result<String>;
}

/// 响应中的执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    Failed,
    /// 没有状态行
    Unknown,
}

impl ResponseStatus {
    /// 取最后一个状态行判断成败
    pub fn of(response: &str) -> Self {
        let status = response
            .lines()
            .rev()
            .map(str::trim)
            .find_map(|line| line.strip_prefix(STATUS_PREFIX));

        match status.map(str::trim) {
            Some("OK") => ResponseStatus::Ok,
            Some(_) => ResponseStatus::Failed,
            None => ResponseStatus::Unknown,
        }
    }
}

/// 把 Failed 响应转换为错误
pub fn check_response(command: &RemoteCommand, response: String) -> Result<String> {
    match ResponseStatus::of(&response) {
        ResponseStatus::Failed => Err(BatchError::RemoteCommandFailed {
            command: command.to_string(),
            response: response.trim_end().to_string(),
        }),
        ResponseStatus::Ok | ResponseStatus::Unknown => Ok(response),
    }
}
