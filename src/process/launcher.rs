//! # 启动器
//!
//! 目标程序未运行时启动它；已运行则跳过。
//! 可执行文件不存在时只报告错误并继续，用户可能已通过其他方式启动程序。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `process/probe.rs`, `utils/output.rs`, `utils/progress.rs`

use super::probe::{self, ProcessTable};
use crate::error::{BatchError, Result};
use crate::utils::{output, progress};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

/// 启动外部程序
pub trait Spawner {
    /// 以分离方式启动，不保留子进程句柄
    fn spawn(&self, executable: &Path) -> std::io::Result<()>;
}

/// 基于 `std::process::Command` 的启动器
#[derive(Debug, Default)]
pub struct DetachedSpawner;

impl Spawner for DetachedSpawner {
    fn spawn(&self, executable: &Path) -> std::io::Result<()> {
        let child = Command::new(executable)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        log::debug!("Spawned {} (pid {})", executable.display(), child.id());
        Ok(())
    }
}

/// 启动后的固定等待
pub trait Waiter {
    fn wait(&self, duration: Duration);
}

/// 显示 spinner 的等待
#[derive(Debug, Default)]
pub struct SpinnerWaiter;

impl Waiter for SpinnerWaiter {
    fn wait(&self, duration: Duration) {
        progress::wait_with_spinner(duration, "Waiting for Audacity to get ready...");
    }
}

/// 启动步骤的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// 已经在运行，未启动
    AlreadyRunning,
    /// 新启动了一个进程
    Launched,
    /// 可执行文件不存在，已跳过
    ExecutableMissing(PathBuf),
}

/// 启动器
pub struct Launcher<'a> {
    processes: &'a dyn ProcessTable,
    spawner: &'a dyn Spawner,
    executable: &'a Path,
    process_name: &'a str,
}

impl<'a> Launcher<'a> {
    pub fn new(
        processes: &'a dyn ProcessTable,
        spawner: &'a dyn Spawner,
        executable: &'a Path,
        process_name: &'a str,
    ) -> Self {
        Self {
            processes,
            spawner,
            executable,
            process_name,
        }
    }

    /// 确保目标程序在运行
    pub fn ensure_running(&self) -> Result<LaunchOutcome> {
        if probe::is_running(self.processes, self.process_name)? {
            output::print_info("Audacity is already running.");
            return Ok(LaunchOutcome::AlreadyRunning);
        }

        output::print_info("Launching Audacity...");
        match self.spawner.spawn(self.executable) {
            Ok(()) => Ok(LaunchOutcome::Launched),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                output::print_error(&format!(
                    "Audacity executable not found at {}",
                    self.executable.display()
                ));
                Ok(LaunchOutcome::ExecutableMissing(self.executable.to_path_buf()))
            }
            Err(e) => Err(BatchError::LaunchFailed {
                path: self.executable.display().to_string(),
                source: e,
            }),
        }
    }
}
