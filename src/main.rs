//! # audacity-batch - Audacity 工程批量处理
//!
//! 通过 mod-script-pipe 远程控制 Audacity：按需启动程序，
//! 遍历目录中的 `.aup3` 工程，依次执行 Normalize、Compressor，
//! 并导出 WAV 和 MP3。音频处理全部由 Audacity 完成。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── config.rs   (TOML 配置 + 命令行覆盖)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── process/ (进程探测与启动)
//!   │     ├── batch/   (文件收集、效果流水线、批量执行)
//!   │     ├── remote/  (远程命令与脚本管道)
//!   │     └── models/  (效果参数)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod models;
mod process;
mod remote;
#[cfg(test)]
mod testing;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

/// 初始化日志；`RUST_LOG` 优先于 `--verbose`
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init()
        .ok();
}
