//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 用法
//! `audacity-batch [OPTIONS] <DIRECTORY>`
//!
//! ## 依赖关系
//! - 被 `main.rs` 和 `config.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use clap::Parser;
use std::path::PathBuf;

/// audacity-batch - 通过 mod-script-pipe 批量处理 Audacity 工程
#[derive(Parser, Debug)]
#[command(name = "audacity-batch")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Normalize, compress and export every Audacity project in a directory",
    long_about = None
)]
pub struct Cli {
    /// Directory containing the project files to process
    pub directory: PathBuf,

    /// TOML config file
    #[arg(short, long, env = "AUDACITY_BATCH_CONFIG")]
    pub config: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────
    // Application
    // ─────────────────────────────────────────────────────────────
    /// Audacity executable to launch when it is not running
    #[arg(long, env = "AUDACITY_PATH")]
    pub audacity_path: Option<PathBuf>,

    /// Process name used to detect a running Audacity
    #[arg(long)]
    pub process_name: Option<String>,

    /// Seconds to wait after the launch step
    #[arg(long, value_name = "SECS")]
    pub launch_delay: Option<u64>,

    /// Do not probe for or launch Audacity; assume it is already running
    #[arg(long, default_value_t = false)]
    pub no_launch: bool,

    // ─────────────────────────────────────────────────────────────
    // Batch
    // ─────────────────────────────────────────────────────────────
    /// Project file extension
    #[arg(short, long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Continue with the remaining files when one file fails
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,

    /// Print the remote commands instead of sending them
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Enable debug logging of pipe traffic
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
