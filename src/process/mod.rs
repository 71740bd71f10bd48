//! # 进程管理模块
//!
//! 探测并按需启动 Audacity。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 子模块: probe, launcher

pub mod launcher;
pub mod probe;

pub use launcher::{DetachedSpawner, Launcher, SpinnerWaiter, Spawner, Waiter};
pub use probe::{ProcessTable, SystemProcessTable};
