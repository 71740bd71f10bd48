//! # 测试替身
//!
//! 进程表、启动器、等待和命令通道的假实现，统一向 `EventLog` 记录调用顺序。

use crate::error::{BatchError, Result};
use crate::process::{ProcessTable, Spawner, Waiter};
use crate::remote::command::ParamValue;
use crate::remote::{CommandChannel, RemoteCommand};

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

/// 共享的调用记录
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.borrow_mut().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// 某事件出现的次数
    pub fn count(&self, event: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.as_str() == event).count()
    }
}

pub struct FakeProcessTable {
    log: EventLog,
    names: Vec<String>,
}

impl FakeProcessTable {
    pub fn new(log: &EventLog, names: &[&str]) -> Self {
        Self {
            log: log.clone(),
            names: names.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ProcessTable for FakeProcessTable {
    fn process_names(&self) -> Result<Vec<String>> {
        self.log.push("probe");
        Ok(self.names.clone())
    }
}

pub struct FakeSpawner {
    log: EventLog,
    error: Option<ErrorKind>,
}

impl FakeSpawner {
    pub fn ok(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            error: None,
        }
    }

    pub fn failing(log: &EventLog, kind: ErrorKind) -> Self {
        Self {
            log: log.clone(),
            error: Some(kind),
        }
    }
}

impl Spawner for FakeSpawner {
    fn spawn(&self, executable: &Path) -> std::io::Result<()> {
        self.log.push(format!("launch {}", executable.display()));
        match self.error {
            Some(kind) => Err(std::io::Error::new(kind, "fake spawn failure")),
            None => Ok(()),
        }
    }
}

pub struct FakeWaiter {
    log: EventLog,
}

impl FakeWaiter {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Waiter for FakeWaiter {
    fn wait(&self, duration: Duration) {
        self.log.push(format!("wait {}s", duration.as_secs()));
    }
}

/// 记录命令的通道
///
/// 打开某个文件后，名为 `fail_command` 的命令返回远程失败。
pub struct RecordingChannel {
    log: EventLog,
    current_file: Option<String>,
    fail: Option<(&'static str, &'static str)>,
}

impl RecordingChannel {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            current_file: None,
            fail: None,
        }
    }

    /// 在文件名以 `file` 结尾时让 `command` 失败
    pub fn failing_on(log: &EventLog, command: &'static str, file: &'static str) -> Self {
        Self {
            fail: Some((command, file)),
            ..Self::new(log)
        }
    }
}

impl CommandChannel for RecordingChannel {
    fn execute(&mut self, command: &RemoteCommand) -> Result<String> {
        let line = command.encode()?;

        if command.name() == "OpenProject2" {
            if let Some(ParamValue::Text(path)) = command.get("Filename") {
                let name = Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.log.push(format!("open {}", name));
                self.current_file = Some(name);
            }
        } else {
            self.log.push(command.name());
        }

        if let (Some((fail_command, fail_file)), Some(current)) = (self.fail, &self.current_file) {
            if command.name() == fail_command && current.ends_with(fail_file) {
                return Err(BatchError::RemoteCommandFailed {
                    command: line,
                    response: "BatchCommand finished: Failed!".to_string(),
                });
            }
        }

        Ok("BatchCommand finished: OK\n".to_string())
    }
}
