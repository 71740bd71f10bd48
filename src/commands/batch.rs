//! # 批处理命令实现
//!
//! 整体流程：探测/启动 Audacity → 固定等待 → 收集工程文件 →
//! 连接脚本管道 → 逐个处理 → 汇总。
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的参数和 `config.rs`
//! - 使用 `process/`, `batch/`, `remote/`, `utils/output.rs`

use crate::batch::{BatchOptions, BatchResult, BatchRunner, EffectPipeline, ProjectCollector};
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::{BatchError, Result};
use crate::process::{
    DetachedSpawner, Launcher, ProcessTable, Spawner, SpinnerWaiter, SystemProcessTable, Waiter,
};
use crate::remote::{CommandChannel, DryRunChannel, PipeChannel};
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 失败文件表格行
#[derive(Debug, Clone, Tabled)]
struct FailureRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Error")]
    error: String,
}

/// 外部协作者
pub struct Collaborators<'a> {
    pub processes: &'a dyn ProcessTable,
    pub spawner: &'a dyn Spawner,
    pub waiter: &'a dyn Waiter,
}

/// 执行批处理命令
pub fn execute(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_cli(&cli)?;
    if let Ok(dump) = toml::to_string(&config) {
        log::debug!("Effective configuration:\n{}", dump);
    }

    output::print_header("Audacity Batch Export");

    let result = if cli.dry_run {
        output::print_info("Dry run: commands are printed, Audacity is not contacted");
        config.application.auto_launch = false;
        run_session(&config, &cli.directory, None, || {
            Ok(Box::new(DryRunChannel::new()) as Box<dyn CommandChannel>)
        })?
    } else {
        let collaborators = Collaborators {
            processes: &SystemProcessTable,
            spawner: &DetachedSpawner,
            waiter: &SpinnerWaiter,
        };
        let paths = config.pipe.paths();
        let policy = config.pipe.retry_policy();
        run_session(&config, &cli.directory, Some(&collaborators), || {
            Ok(Box::new(PipeChannel::connect(&paths, &policy)?) as Box<dyn CommandChannel>)
        })?
    };

    report(&config, &cli.directory, &result)
}

/// 运行一次完整的批处理会话
///
/// `collaborators` 为 None 或关闭 auto_launch 时跳过探测、启动和等待。
/// `connect` 只在找到至少一个文件后调用。
pub fn run_session<F>(
    config: &AppConfig,
    directory: &Path,
    collaborators: Option<&Collaborators<'_>>,
    connect: F,
) -> Result<BatchResult>
where
    F: FnOnce() -> Result<Box<dyn CommandChannel>>,
{
    if let Some(c) = collaborators.filter(|_| config.application.auto_launch) {
        let launcher = Launcher::new(
            c.processes,
            c.spawner,
            &config.application.executable,
            &config.application.process_name,
        );
        launcher.ensure_running()?;
        c.waiter.wait(config.application.launch_delay());
    }

    let files = ProjectCollector::new(directory, config.extension())?.collect()?;
    if files.is_empty() {
        output::print_warning(&format!(
            "No .{} files found in {}",
            config.extension(),
            directory.display()
        ));
        return Ok(BatchResult::default());
    }
    output::print_info(&format!(
        "Found {} .{} files",
        files.len(),
        config.extension()
    ));

    let mut channel = connect()?;
    let pipeline = EffectPipeline::new(&config.effects);
    let options = BatchOptions {
        add_to_history: config.batch.add_to_history,
        keep_going: config.batch.keep_going,
    };

    BatchRunner::new(&pipeline, options).run(&files, channel.as_mut())
}

/// 打印汇总；存在失败时返回错误
fn report(config: &AppConfig, directory: &Path, result: &BatchResult) -> Result<()> {
    output::print_separator();

    if !result.failures.is_empty() {
        let rows: Vec<FailureRow> = result
            .failures
            .iter()
            .map(|(path, err)| FailureRow {
                file: path.display().to_string(),
                error: err.clone(),
            })
            .collect();
        println!("{}", Table::new(&rows));
        output::print_warning(&format!(
            "{} of {} files failed",
            result.failed,
            result.total()
        ));
    }

    output::print_done(&summary_line(
        result.success,
        config.extension(),
        directory,
    ));

    if result.failed > 0 {
        return Err(BatchError::BatchFailed {
            failed: result.failed,
            total: result.total(),
        });
    }
    Ok(())
}

fn summary_line(count: usize, extension: &str, directory: &Path) -> String {
    format!(
        "Successfully exported {} .{} files from {}",
        count,
        extension,
        directory.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EventLog, FakeProcessTable, FakeSpawner, FakeWaiter, RecordingChannel};
    use std::fs;
    use std::path::PathBuf;

    const EFFECTS: [&str; 6] = [
        "SelectAll",
        "Normalize",
        "Compressor",
        "LegacyMacroOutputFolder",
        "ExportWav",
        "ExportMp3",
    ];

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.application.executable = PathBuf::from("/opt/audacity/Audacity.exe");
        config.application.process_name = "Audacity.exe".to_string();
        config
    }

    fn project_dir(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        dir
    }

    fn expected_file_events(name: &str) -> Vec<String> {
        let mut events = vec![format!("open {}", name)];
        events.extend(EFFECTS.iter().map(|s| s.to_string()));
        events.push("Close".to_string());
        events
    }

    #[test]
    fn test_end_to_end_order() {
        let dir = project_dir(&["a.aup3", "b.aup3"]);
        let log = EventLog::default();
        let table = FakeProcessTable::new(&log, &["explorer.exe"]);
        let spawner = FakeSpawner::ok(&log);
        let waiter = FakeWaiter::new(&log);
        let collaborators = Collaborators {
            processes: &table,
            spawner: &spawner,
            waiter: &waiter,
        };

        let channel_log = log.clone();
        let result = run_session(&config(), dir.path(), Some(&collaborators), move || {
            channel_log.push("connect");
            Ok(Box::new(RecordingChannel::new(&channel_log)) as Box<dyn CommandChannel>)
        })
        .unwrap();

        assert_eq!(result.success, 2);

        let events = log.events();
        assert_eq!(
            events[..4],
            [
                "probe".to_string(),
                "launch /opt/audacity/Audacity.exe".to_string(),
                "wait 3s".to_string(),
                "connect".to_string(),
            ]
        );

        // 枚举顺序不固定，按打开顺序逐段核对
        let first = events[4].trim_start_matches("open ").to_string();
        let second = if first == "a.aup3" { "b.aup3" } else { "a.aup3" };
        let mut expected = expected_file_events(&first);
        expected.extend(expected_file_events(second));
        assert_eq!(events[4..], expected[..]);

        assert_eq!(
            summary_line(result.success, "aup3", dir.path()),
            format!("Successfully exported 2 .aup3 files from {}", dir.path().display())
        );
    }

    #[test]
    fn test_running_application_is_not_launched() {
        let dir = project_dir(&["a.aup3"]);
        let log = EventLog::default();
        let table = FakeProcessTable::new(&log, &["Audacity.exe"]);
        let spawner = FakeSpawner::ok(&log);
        let waiter = FakeWaiter::new(&log);
        let collaborators = Collaborators {
            processes: &table,
            spawner: &spawner,
            waiter: &waiter,
        };

        let channel_log = log.clone();
        run_session(&config(), dir.path(), Some(&collaborators), move || {
            Ok(Box::new(RecordingChannel::new(&channel_log)) as Box<dyn CommandChannel>)
        })
        .unwrap();

        let events = log.events();
        assert_eq!(events[..2], ["probe".to_string(), "wait 3s".to_string()]);
        assert!(!events.iter().any(|e| e.starts_with("launch")));
    }

    #[test]
    fn test_missing_directory_fails_before_any_command() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let log = EventLog::default();

        let channel_log = log.clone();
        let err = run_session(&config(), &missing, None, move || {
            channel_log.push("connect");
            Ok(Box::new(RecordingChannel::new(&channel_log)) as Box<dyn CommandChannel>)
        })
        .unwrap_err();

        assert!(matches!(err, BatchError::DirectoryNotFound { .. }));
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_empty_directory_does_not_connect() {
        let dir = project_dir(&["readme.txt"]);
        let log = EventLog::default();

        let channel_log = log.clone();
        let result = run_session(&config(), dir.path(), None, move || {
            channel_log.push("connect");
            Ok(Box::new(RecordingChannel::new(&channel_log)) as Box<dyn CommandChannel>)
        })
        .unwrap();

        assert_eq!(result.total(), 0);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_auto_launch_disabled_skips_probe() {
        let dir = project_dir(&["a.aup3"]);
        let log = EventLog::default();
        let table = FakeProcessTable::new(&log, &[]);
        let spawner = FakeSpawner::ok(&log);
        let waiter = FakeWaiter::new(&log);
        let collaborators = Collaborators {
            processes: &table,
            spawner: &spawner,
            waiter: &waiter,
        };
        let mut config = config();
        config.application.auto_launch = false;

        let channel_log = log.clone();
        run_session(&config, dir.path(), Some(&collaborators), move || {
            Ok(Box::new(RecordingChannel::new(&channel_log)) as Box<dyn CommandChannel>)
        })
        .unwrap();

        assert_eq!(log.count("probe"), 0);
        assert_eq!(log.events()[0], "open a.aup3");
    }

    #[test]
    fn test_failure_aborts_remaining_files_by_default() {
        let dir = project_dir(&["a.aup3", "b.aup3"]);
        let log = EventLog::default();

        let channel_log = log.clone();
        let err = run_session(&config(), dir.path(), None, move || {
            Ok(Box::new(RecordingChannel::failing_on(&channel_log, "Compressor", ".aup3"))
                as Box<dyn CommandChannel>)
        })
        .unwrap_err();

        assert!(matches!(err, BatchError::RemoteCommandFailed { .. }));
        assert_eq!(log.count("Close"), 1);
        assert_eq!(log.events().iter().filter(|e| e.starts_with("open")).count(), 1);
    }

    #[test]
    fn test_report_fails_when_files_failed() {
        let mut result = BatchResult::default();
        result.success = 1;
        result.failed = 1;
        result
            .failures
            .push((PathBuf::from("/music/b.aup3"), "boom".to_string()));

        let err = report(&config(), Path::new("/music"), &result).unwrap_err();
        assert!(matches!(err, BatchError::BatchFailed { failed: 1, total: 2 }));
    }
}
