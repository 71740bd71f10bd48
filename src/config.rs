//! # 配置管理
//!
//! 可执行文件路径、启动等待、管道参数和效果参数都集中在 `AppConfig` 中。
//! 先读取 TOML 配置文件（可只写部分字段），再由命令行参数覆盖。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `cli/mod.rs` 的参数进行覆盖
//! - 使用 `serde` + `toml`

use crate::cli::Cli;
use crate::error::{BatchError, Result};
use crate::models::EffectSettings;
use crate::remote::{PipePaths, RetryPolicy};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(windows)]
const DEFAULT_EXECUTABLE: &str = r"C:\Program Files\Audacity\Audacity.exe";
#[cfg(not(windows))]
const DEFAULT_EXECUTABLE: &str = "/usr/bin/audacity";

#[cfg(windows)]
const DEFAULT_PROCESS_NAME: &str = "Audacity.exe";
#[cfg(not(windows))]
const DEFAULT_PROCESS_NAME: &str = "audacity";

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub application: ApplicationConfig,
    pub discovery: DiscoveryConfig,
    pub pipe: PipeConfig,
    pub batch: BatchConfig,
    pub effects: EffectSettings,
}

/// Audacity 进程相关
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub executable: PathBuf,
    pub process_name: String,
    pub launch_delay_secs: u64,
    /// 关闭后跳过探测、启动和等待
    pub auto_launch: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            process_name: DEFAULT_PROCESS_NAME.to_string(),
            launch_delay_secs: 3,
            auto_launch: true,
        }
    }
}

impl ApplicationConfig {
    pub fn launch_delay(&self) -> Duration {
        Duration::from_secs(self.launch_delay_secs)
    }
}

/// 工程文件搜索
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub extension: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extension: "aup3".to_string(),
        }
    }
}

/// 脚本管道
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeConfig {
    /// 为空时使用平台默认路径
    pub to_server: Option<PathBuf>,
    pub from_server: Option<PathBuf>,
    pub connect_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            to_server: None,
            from_server: None,
            connect_attempts: 5,
            initial_backoff_ms: 250,
            max_backoff_ms: 2000,
        }
    }
}

impl PipeConfig {
    pub fn paths(&self) -> PipePaths {
        let default = PipePaths::platform_default();
        PipePaths {
            to_server: self.to_server.clone().unwrap_or(default.to_server),
            from_server: self.from_server.clone().unwrap_or(default.from_server),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.connect_attempts.max(1),
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }
}

/// 批处理行为
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// 打开工程时是否加入最近文件列表
    pub add_to_history: bool,
    /// 单个文件失败后继续处理剩余文件
    pub keep_going: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            add_to_history: true,
            keep_going: false,
        }
    }
}

impl AppConfig {
    /// 从 TOML 文件加载
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| BatchError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content, path)
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| BatchError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// 加载配置文件（若提供）并应用命令行覆盖
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli)?;
        Ok(config)
    }

    fn apply_overrides(&mut self, cli: &Cli) -> Result<()> {
        if let Some(path) = &cli.audacity_path {
            self.application.executable = path.clone();
        }
        if let Some(name) = &cli.process_name {
            self.application.process_name = name.clone();
        }
        if let Some(delay) = cli.launch_delay {
            self.application.launch_delay_secs = delay;
        }
        if cli.no_launch {
            self.application.auto_launch = false;
        }
        if let Some(ext) = &cli.extension {
            self.discovery.extension = ext.clone();
        }
        if cli.keep_going {
            self.batch.keep_going = true;
        }

        let ext = self.extension();
        if ext.is_empty() || ext.contains(['/', '\\', '*', '?', '[']) {
            return Err(BatchError::InvalidArgument(format!(
                "invalid project extension '{}'",
                self.discovery.extension
            )));
        }
        Ok(())
    }

    /// 不带前导点的扩展名
    pub fn extension(&self) -> &str {
        self.discovery.extension.trim().trim_start_matches('.')
    }
}
