// ==========================================
// CAGED 招聘薪资聚合 - 错误日志
// ==========================================
// 职责: 追加式文本日志，每个被拒文件 / 行级异常一行
// 红线: 跨 worker 唯一共享资源，写入经 Mutex 串行化
// 红线: 日志写入失败不中断运行（降级为 tracing::error!）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub struct ErrorLog {
    sink: Mutex<Box<dyn Write + Send>>,
    lines: AtomicU64,
}

impl ErrorLog {
    /// 以追加模式打开（不存在则创建）
    pub fn open(path: &Path) -> ImportResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                ImportError::ErrorLogWriteError(format!("{}: {}", path.display(), e))
            })?;
        Ok(Self::from_writer(file))
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
            lines: AtomicU64::new(0),
        }
    }

    /// 丢弃所有内容（测试 / 未配置日志文件时使用）
    pub fn discard() -> Self {
        Self::from_writer(io::sink())
    }

    /// 写入一行（带本地时间戳）
    pub fn record(&self, message: &str) {
        let line = format!(
            "[{}] {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            message.replace('\n', " ")
        );

        // worker panic 导致的锁中毒不影响后续写入
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let result = sink.write_all(line.as_bytes()).and_then(|_| sink.flush());
        match result {
            Ok(()) => {
                self.lines.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!(error = %e, message = %message, "错误日志写入失败");
            }
        }
    }

    /// 已写入行数
    pub fn lines_written(&self) -> u64 {
        self.lines.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_error_log_appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log_CAGEDERRORS.txt");

        {
            let log = ErrorLog::open(&path).unwrap();
            log.record("Erro: primeira");
            assert_eq!(log.lines_written(), 1);
        }
        {
            let log = ErrorLog::open(&path).unwrap();
            log.record("Erro: segunda\ncom quebra");
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Erro: primeira"));
        assert!(lines[1].ends_with("Erro: segunda com quebra"));
    }

    #[test]
    fn test_error_log_concurrent_writes_stay_line_atomic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        let log = Arc::new(ErrorLog::open(&path).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        log.record(&format!("worker {} linha {}", worker, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.lines_written(), 400);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 400);
        assert!(content.lines().all(|l| l.starts_with('[') && l.contains("] worker ")));
    }

    #[test]
    fn test_discard_counts_lines() {
        let log = ErrorLog::discard();
        log.record("ignored");
        assert_eq!(log.lines_written(), 1);
    }
}
