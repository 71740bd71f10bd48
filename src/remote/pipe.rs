//! # mod-script-pipe 客户端
//!
//! Audacity 开启 mod-script-pipe 后会创建两个命名管道：
//! 一个接收命令 (to-server)，一个返回响应 (from-server)。
//!
//! ## 协议
//! - 每条命令占一行，Windows 行尾为 `\r\n\0`，其他平台为 `\n`
//! - 响应为若干行，读到一个空行即结束
//! - 最后的状态行为 `BatchCommand finished: OK` 或 `... Failed!`
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `remote/retry.rs` 进行连接重试

use super::{check_response, CommandChannel, RemoteCommand, RetryPolicy};
use crate::error::{BatchError, Result};

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[cfg(windows)]
const EOL: &str = "\r\n\0";
#[cfg(not(windows))]
const EOL: &str = "\n";

/// 两个管道的路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipePaths {
    /// 命令写入端
    pub to_server: PathBuf,
    /// 响应读取端
    pub from_server: PathBuf,
}

impl PipePaths {
    /// 当前平台的默认管道路径
    #[cfg(windows)]
    pub fn platform_default() -> Self {
        Self {
            to_server: PathBuf::from(r"\\.\pipe\ToSrvPipe"),
            from_server: PathBuf::from(r"\\.\pipe\FromSrvPipe"),
        }
    }

    /// 当前平台的默认管道路径
    #[cfg(unix)]
    pub fn platform_default() -> Self {
        let uid = nix::unistd::getuid();
        Self {
            to_server: PathBuf::from(format!("/tmp/audacity_script_pipe.to.{}", uid)),
            from_server: PathBuf::from(format!("/tmp/audacity_script_pipe.from.{}", uid)),
        }
    }
}

/// 基于读写流的命令通道
pub struct PipeChannel<W, R> {
    writer: W,
    reader: R,
}

impl PipeChannel<File, BufReader<File>> {
    /// 打开两个管道，失败时按退避策略重试
    ///
    /// 必须先打开写入端，Audacity 才会创建响应端。
    pub fn connect(paths: &PipePaths, policy: &RetryPolicy) -> Result<Self> {
        let writer = open_with_retry(policy, &paths.to_server, |p| {
            OpenOptions::new().write(true).open(p)
        })?;
        let reader = open_with_retry(policy, &paths.from_server, |p| File::open(p))?;

        log::debug!(
            "Connected to {} / {}",
            paths.to_server.display(),
            paths.from_server.display()
        );

        Ok(Self::new(writer, BufReader::new(reader)))
    }
}

fn open_with_retry<F>(policy: &RetryPolicy, path: &Path, open: F) -> Result<File>
where
    F: Fn(&Path) -> std::io::Result<File>,
{
    policy
        .run(
            |attempt| {
                log::debug!("Opening {} (attempt {})", path.display(), attempt);
                open(path)
            },
            std::thread::sleep,
        )
        .map_err(|(attempts, source)| BatchError::PipeConnect {
            path: path.display().to_string(),
            attempts,
            source,
        })
}

impl<W: Write, R: BufRead> PipeChannel<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Self { writer, reader }
    }

    fn send(&mut self, line: &str) -> std::io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(EOL.as_bytes())?;
        self.writer.flush()
    }

    /// 读取一条完整响应；EOF 时返回 None
    fn read_response(&mut self) -> std::io::Result<Option<String>> {
        let mut response = String::new();
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if line.trim_end_matches(['\r', '\n']).is_empty() && !response.is_empty() {
                return Ok(Some(response));
            }
            response.push_str(&line);
        }
    }
}

impl<W: Write, R: BufRead> CommandChannel for PipeChannel<W, R> {
    fn execute(&mut self, command: &RemoteCommand) -> Result<String> {
        let line = command.encode()?;
        log::debug!("-> {}", line);

        self.send(&line)
            .map_err(|source| BatchError::PipeIo { source })?;

        let response = self
            .read_response()
            .map_err(|source| BatchError::PipeIo { source })?
            .ok_or_else(|| BatchError::PipeClosed {
                command: line.clone(),
            })?;
        log::debug!("<- {}", response.trim_end());

        check_response(command, response)
    }
}
