//! # 远程命令模型
//!
//! mod-script-pipe 的命令以 `Name: Key="value" ...` 文本形式发送。
//! 这里把它建模为「命令名 + 有序参数表」，避免手写字符串。
//!
//! ## 依赖关系
//! - 被 `models/effects.rs`, `batch/` 和 `remote/pipe.rs` 使用
//! - 无外部模块依赖

use crate::error::{BatchError, Result};

use std::fmt;
use std::path::Path;

/// 参数值
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// 文本（路径、预设名等）
    Text(String),
    /// 数值，按最短十进制形式输出
    Number(f64),
    /// 布尔开关，输出为 1 / 0
    Flag(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Flag(b) => write!(f, "{}", if *b { 1 } else { 0 }),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Flag(b)
    }
}

/// 一条远程命令
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCommand {
    name: String,
    params: Vec<(String, ParamValue)>,
}

impl RemoteCommand {
    /// 创建不带参数的命令
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    /// 追加一个参数（保持插入顺序）
    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[(String, ParamValue)] {
        &self.params
    }

    /// 按参数名查找
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// 编码为管道上的一行文本（不含行尾）
    ///
    /// 协议没有转义机制，值中出现双引号或换行时无法表达，直接报错。
    pub fn encode(&self) -> Result<String> {
        for (key, value) in self.params() {
            if let ParamValue::Text(s) = value {
                if s.contains(['"', '\n', '\r']) {
                    return Err(BatchError::InvalidParameter {
                        command: self.name().to_string(),
                        key: key.clone(),
                    });
                }
            }
        }
        Ok(self.to_string())
    }

    // ─────────────────────────────────────────────────────────────
    // 常用命令
    // ─────────────────────────────────────────────────────────────

    /// 打开工程文件；路径不是合法 UTF-8 时无法在管道上表达
    pub fn open_project(path: &Path, add_to_history: bool) -> Result<Self> {
        let filename = path.to_str().ok_or_else(|| BatchError::InvalidParameter {
            command: "OpenProject2".to_string(),
            key: "Filename".to_string(),
        })?;
        Ok(Self::new("OpenProject2")
            .param("Filename", filename)
            .param("AddToHistory", add_to_history))
    }

    /// 关闭当前工程
    pub fn close() -> Self {
        Self::new("Close")
    }

    /// 全选
    pub fn select_all() -> Self {
        Self::new("SelectAll")
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.params.is_empty() {
            return Ok(());
        }
        write!(f, ":")?;
        for (key, value) in self.params() {
            write!(f, " {}=\"{}\"", key, value)?;
        }
        Ok(())
    }
}
