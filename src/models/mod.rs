//! # 数据模型模块
//!
//! 定义效果参数与导出设置。
//!
//! ## 依赖关系
//! - 被 `config.rs`, `batch/` 使用
//! - 子模块: effects

pub mod effects;

pub use effects::{EffectSettings, ExportFormat};
