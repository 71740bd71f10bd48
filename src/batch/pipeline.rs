//! # 效果流水线
//!
//! 对当前打开的工程依次执行：全选、Normalize、Compressor、
//! 设置导出目录预设、导出 WAV、导出 MP3。顺序固定，不做重试或回滚。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `models/effects.rs` 生成命令

use crate::error::Result;
use crate::models::{EffectSettings, ExportFormat};
use crate::remote::{CommandChannel, RemoteCommand};

/// 固定顺序的命令序列
#[derive(Debug, Clone)]
pub struct EffectPipeline {
    commands: Vec<RemoteCommand>,
}

impl EffectPipeline {
    pub fn new(settings: &EffectSettings) -> Self {
        let mut commands = vec![
            RemoteCommand::select_all(),
            settings.normalize.to_command(),
            settings.compressor.to_command(),
            settings.export.preset_command(),
        ];
        commands.extend(ExportFormat::ALL.iter().map(|f| f.to_command()));
        Self { commands }
    }

    pub fn commands(&self) -> &[RemoteCommand] {
        &self.commands
    }

    /// 依次发送全部命令，遇到第一个错误即返回
    pub fn apply(&self, channel: &mut dyn CommandChannel) -> Result<()> {
        for command in self.commands() {
            channel.execute(command)?;
        }
        Ok(())
    }
}

impl Default for EffectPipeline {
    fn default() -> Self {
        Self::new(&EffectSettings::default())
    }
}
