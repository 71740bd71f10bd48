//! # 批量执行器
//!
//! 顺序处理工程文件：打开 → 效果流水线 → 关闭。
//!
//! ## 功能
//! - 无论打开或效果是否出错，每个文件都恰好发送一次 Close
//! - 默认遇到失败立即中止；`keep_going` 时记录失败并继续
//! - 进度输出与结果汇总
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `batch/pipeline.rs`, `remote/`, `utils/output.rs`

use super::pipeline::EffectPipeline;
use crate::error::Result;
use crate::remote::{CommandChannel, RemoteCommand};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(PathBuf),
    /// 处理失败
    Failed(PathBuf, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(path) => {
                log::debug!("Finished {}", path.display());
                self.success += 1;
            }
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

/// 执行选项
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// 打开工程时加入最近文件列表
    pub add_to_history: bool,
    /// 失败后继续
    pub keep_going: bool,
}

/// 批量执行器
pub struct BatchRunner<'a> {
    pipeline: &'a EffectPipeline,
    options: BatchOptions,
}

impl<'a> BatchRunner<'a> {
    pub fn new(pipeline: &'a EffectPipeline, options: BatchOptions) -> Self {
        Self { pipeline, options }
    }

    /// 按给定顺序处理文件
    pub fn run(&self, files: &[PathBuf], channel: &mut dyn CommandChannel) -> Result<BatchResult> {
        let total = files.len();
        let mut result = BatchResult::default();

        for (i, file) in files.iter().enumerate() {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            output::print_step(i + 1, total, &format!("Opening {}...", name));

            match self.process_one(file, channel) {
                Ok(()) => result.merge(ProcessResult::Success(file.clone())),
                Err(e) if self.options.keep_going => {
                    output::print_error(&format!("{}: {}", name, e));
                    result.merge(ProcessResult::Failed(file.clone(), e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(result)
    }

    /// 处理单个文件，保证发送 Close
    ///
    /// 无法编码的路径在发送任何命令前失败，此时没有打开工程，也不发送 Close。
    fn process_one(&self, file: &Path, channel: &mut dyn CommandChannel) -> Result<()> {
        let open = RemoteCommand::open_project(file, self.options.add_to_history)?;
        let outcome = channel
            .execute(&open)
            .and_then(|_| self.pipeline.apply(channel));

        let closed = channel.execute(&RemoteCommand::close());

        match (outcome, closed) {
            (Err(e), Err(close_err)) => {
                log::warn!("Close after failure also failed: {}", close_err);
                Err(e)
            }
            (Err(e), Ok(_)) => Err(e),
            (Ok(()), Err(close_err)) => Err(close_err),
            (Ok(()), Ok(_)) => Ok(()),
        }
    }
}
