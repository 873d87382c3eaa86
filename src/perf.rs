use std::time::{Duration, Instant};

/// 性能统计 Guard：离开作用域时记录 elapsed_ms
///
/// 使用方式：
/// ```ignore
/// let _perf = caged_salary_report::perf::PerfGuard::new("aggregate_run");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        tracing::info!(target: "perf", op = self.op, elapsed_ms, "done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_monotonic() {
        let guard = PerfGuard::new("test");
        let first = guard.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert!(guard.elapsed() >= first + Duration::from_millis(5));
    }
}
