//! # dry-run 通道
//!
//! 不连接 Audacity，只把将要发送的命令打印出来。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 在 `--dry-run` 时使用
//! - 使用 `utils/output.rs`

use super::{CommandChannel, RemoteCommand};
use crate::error::Result;
use crate::utils::output;

/// 打印命令而不执行
#[derive(Debug, Default)]
pub struct DryRunChannel;

impl DryRunChannel {
    pub fn new() -> Self {
        Self
    }
}

impl CommandChannel for DryRunChannel {
    fn execute(&mut self, command: &RemoteCommand) -> Result<String> {
        let line = command.encode()?;
        output::print_dry(&line);
        Ok("BatchCommand finished: OK\n".to_string())
    }
}
