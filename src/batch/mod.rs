//! # 批量处理模块
//!
//! 收集工程文件并逐个交给 Audacity 处理。
//!
//! ## 功能
//! - 校验目录并收集匹配文件
//! - 固定顺序的效果流水线
//! - 顺序执行与结果统计
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `remote/` 发送命令

pub mod collector;
pub mod pipeline;
pub mod runner;

pub use collector::ProjectCollector;
pub use pipeline::EffectPipeline;
pub use runner::{BatchOptions, BatchResult, BatchRunner};
