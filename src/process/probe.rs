//! # 进程探测
//!
//! 检查目标程序是否已经在运行。进程枚举放在 `ProcessTable` trait 之后，
//! 测试中可以替换为固定的进程列表。
//!
//! ## 依赖关系
//! - 被 `process/launcher.rs` 使用
//! - 使用 `sysinfo` 枚举系统进程

use crate::error::{BatchError, Result};

use sysinfo::{ProcessesToUpdate, System};

/// 进程名来源
pub trait ProcessTable {
    /// 当前所有进程的名称
    fn process_names(&self) -> Result<Vec<String>>;
}

/// 基于 sysinfo 的系统进程表
#[derive(Debug, Default)]
pub struct SystemProcessTable;

impl ProcessTable for SystemProcessTable {
    fn process_names(&self) -> Result<Vec<String>> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(BatchError::ProcessEnumeration(
                "sysinfo does not support this platform".to_string(),
            ));
        }

        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::All, true);

        Ok(system
            .processes()
            .values()
            .map(|p| p.name().to_string_lossy().into_owned())
            .collect())
    }
}

/// 是否存在名称与 `name` 完全相同的进程
pub fn is_running(table: &dyn ProcessTable, name: &str) -> Result<bool> {
    let names = table.process_names()?;
    Ok(names.iter().any(|n| n == name))
}
