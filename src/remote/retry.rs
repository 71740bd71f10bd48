//! # 重试与退避
//!
//! Audacity 启动后脚本管道不一定立即可用。固定等待之后，
//! 按指数退避重复尝试打开管道，直到成功或次数用尽。
//!
//! ## 依赖关系
//! - 被 `remote/pipe.rs` 使用

use std::time::Duration;

/// 有界重试策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最多尝试次数（至少 1 次）
    pub attempts: u32,
    /// 第一次失败后的等待
    pub initial_backoff: Duration,
    /// 单次等待上限
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// 各次尝试之间的等待时长（长度为 attempts - 1）
    pub fn schedule(&self) -> Vec<Duration> {
        let mut delays = Vec::new();
        let mut next = self.initial_backoff;
        for _ in 1..self.attempts.max(1) {
            delays.push(next.min(self.max_backoff));
            next = next.saturating_mul(2);
        }
        delays
    }

    /// 执行 `op` 直到成功；失败时返回最后一次错误和已尝试次数
    pub fn run<T, E, F, S>(&self, mut op: F, mut sleep: S) -> std::result::Result<T, (u32, E)>
    where
        F: FnMut(u32) -> std::result::Result<T, E>,
        S: FnMut(Duration),
    {
        let schedule = self.schedule();
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) => match schedule.get(attempt as usize - 1) {
                    Some(delay) => {
                        sleep(*delay);
                        attempt += 1;
                    }
                    None => return Err((attempt, e)),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(350),
        }
    }

    #[test]
    fn test_schedule_doubles_and_caps() {
        let ms: Vec<u128> = policy(5).schedule().iter().map(|d| d.as_millis()).collect();
        assert_eq!(ms, vec![100, 200, 350, 350]);
    }

    #[test]
    fn test_single_attempt_has_no_delay() {
        assert!(policy(1).schedule().is_empty());
        assert!(policy(0).schedule().is_empty());
    }

    #[test]
    fn test_run_stops_on_success() {
        let mut slept = Vec::new();
        let result: std::result::Result<u32, (u32, &str)> = policy(5).run(
            |attempt| if attempt < 3 { Err("not yet") } else { Ok(attempt) },
            |d| slept.push(d),
        );
        assert_eq!(result, Ok(3));
        assert_eq!(slept.len(), 2);
    }

    #[test]
    fn test_run_gives_up() {
        let mut calls = 0;
        let result: std::result::Result<(), (u32, &str)> = policy(3).run(
            |_| {
                calls += 1;
                Err("down")
            },
            |_| {},
        );
        assert_eq!(result, Err((3, "down")));
        assert_eq!(calls, 3);
    }
}
