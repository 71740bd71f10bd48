//! # 进度提示工具
//!
//! 封装 `indicatif`，在等待 Audacity 启动时显示 spinner。
//!
//! ## 依赖关系
//! - 被 `process/launcher.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 创建 spinner（用于不确定进度的任务）
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {elapsed_precise} {msg}") {
        pb.set_style(style.tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 显示 spinner 并阻塞等待指定时长
pub fn wait_with_spinner(duration: Duration, message: &str) {
    if duration.is_zero() {
        return;
    }
    let pb = create_spinner(message);
    std::thread::sleep(duration);
    pb.finish_and_clear();
}
