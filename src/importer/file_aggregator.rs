// ==========================================
// CAGED 招聘薪资聚合 - 单文件聚合器
// ==========================================
// 职责: 流式扫描一个文件 → 该文件的子类 / 职业聚合
// 流程: 打开 → 表头校验 → 逐行规范化 → 累加
// 红线: 行级失败在本层吞掉（计数后跳过），从不中断文件
// 红线: 文件级失败（打开 / 结构 / IO）不产生部分聚合
// ==========================================

use crate::domain::aggregate::{Aggregate, ScanStats};
use crate::error_log::ErrorLog;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{CsvRecordReader, ParsedRow};
use crate::importer::record_normalizer::RecordNormalizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// 单文件聚合结果
#[derive(Debug, Clone, PartialEq)]
pub struct FileAggregate {
    pub path: PathBuf,
    pub reporting_date: String,
    pub aggregate: Aggregate,
    pub stats: ScanStats,
}

pub struct FileAggregator {
    normalizer: RecordNormalizer,
    error_log: Arc<ErrorLog>,
}

impl FileAggregator {
    pub fn new(normalizer: RecordNormalizer, error_log: Arc<ErrorLog>) -> Self {
        Self {
            normalizer,
            error_log,
        }
    }

    /// 聚合单个文件
    ///
    /// # 参数
    /// - path: 文件路径
    /// - reporting_date: 由文件名推导的参考日期（YYYY-MM-01）
    ///
    /// # 返回
    /// - Ok(FileAggregate): 完整的文件级聚合
    /// - Err: 文件级失败（调用方负责记录错误日志）
    #[instrument(skip(self, path), fields(file = %path.display()))]
    pub fn aggregate_file(&self, path: &Path, reporting_date: &str) -> ImportResult<FileAggregate> {
        let reader = CsvRecordReader::open(path)?;
        let file_label = reader.path().to_string();

        let mut aggregate = Aggregate::new();
        let mut stats = ScanStats::default();

        for row in reader {
            match row? {
                ParsedRow::Record(record) => {
                    stats.rows_read += 1;
                    match self.normalizer.normalize(&record) {
                        Ok(observation) => {
                            aggregate.record(reporting_date, &observation);
                            stats.rows_accepted += 1;
                        }
                        Err(reason) => {
                            trace!(line = record.line_number, reason = %reason, "行被拒绝");
                            stats.record_rejection(reason.code());
                        }
                    }
                }
                ParsedRow::Malformed { line, message } => {
                    stats.rows_read += 1;
                    stats.rows_malformed += 1;
                    self.error_log.record(&format!(
                        "行解析异常: 文件 {} 第 {} 行: {}",
                        file_label,
                        line,
                        message
                    ));
                }
            }
        }
        stats.files_processed = 1;

        debug!(
            reporting_date = %reporting_date,
            rows = stats.rows_read,
            accepted = stats.rows_accepted,
            rejected = stats.rows_rejected(),
            malformed = stats.rows_malformed,
            "文件聚合完成"
        );

        Ok(FileAggregate {
            path: path.to_path_buf(),
            reporting_date: reporting_date.to_string(),
            aggregate,
            stats,
        })
    }
}
