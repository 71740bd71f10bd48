//! # 工程文件收集器
//!
//! 在目标目录中查找指定扩展名的工程文件。
//!
//! ## 功能
//! - 校验目录存在且确实是目录
//! - 只搜索一层，不递归
//! - 返回绝对路径
//!
//! 返回顺序即文件系统枚举顺序，不做排序，不同平台之间不保证一致。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{BatchError, Result};

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 工程文件收集器
pub struct ProjectCollector {
    /// 目标目录
    directory: PathBuf,
    /// 文件名匹配模式，如 `*.aup3`
    pattern: Pattern,
}

impl ProjectCollector {
    /// 创建收集器；`extension` 可带或不带前导点
    pub fn new(directory: &Path, extension: &str) -> Result<Self> {
        let extension = extension.trim().trim_start_matches('.');
        let pattern = Pattern::new(&format!("*.{}", Pattern::escape(extension))).map_err(|e| {
            BatchError::InvalidArgument(format!("invalid extension '{}': {}", extension, e))
        })?;

        Ok(Self {
            directory: directory.to_path_buf(),
            pattern,
        })
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if !self.directory.exists() {
            return Err(BatchError::DirectoryNotFound {
                path: self.directory.display().to_string(),
            });
        }
        if !self.directory.is_dir() {
            return Err(BatchError::NotADirectory {
                path: self.directory.display().to_string(),
            });
        }

        let root = std::path::absolute(&self.directory).map_err(|e| {
            BatchError::DirectoryReadError {
                path: self.directory.display().to_string(),
                source: e,
            }
        })?;

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| BatchError::DirectoryReadError {
                path: root.display().to_string(),
                source: e.into(),
            })?;
            if entry.file_type().is_file() && self.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }

        log::debug!("Found {} project files in {}", files.len(), root.display());
        Ok(files)
    }

    /// 文件名是否匹配
    fn matches(&self, path: &Path) -> bool {
        let options = MatchOptions {
            case_sensitive: !cfg!(windows),
            ..MatchOptions::new()
        };
        // 非 UTF-8 文件名按替换后的文本匹配，替换字符不会凑出扩展名
        match path.file_name() {
            Some(name) => self.pattern.matches_with(&name.to_string_lossy(), options),
            None => false,
        }
    }
}
