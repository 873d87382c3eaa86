// ==========================================
// CAGED 招聘薪资聚合 - 聚合流水线编排器
// ==========================================
// 职责: 协调一次完整运行
// 流程: 文件列表 → 分片 → 各 worker 逐文件聚合 → 屏障 → 合并归约 → 报表行
// 红线: 任何文件级失败都不致命；失败文件记录错误日志后跳过
// 红线: 报表只在屏障之后由协调方生成一次
// ==========================================

use crate::config::{ExecutionMode, PipelineConfig};
use crate::domain::aggregate::{GlobalAggregate, ScanStats};
use crate::engine::merge_reducer;
use crate::engine::partitioner::{partition, Shard};
use crate::engine::shard_runner::{
    ConcurrentShardRunner, SequentialShardRunner, ShardOutcome, ShardRunner, ShardTask,
};
use crate::error_log::ErrorLog;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_aggregator::FileAggregator;
use crate::importer::file_date::{is_calendar_date, reporting_date_for};
use crate::importer::record_normalizer::RecordNormalizer;
use crate::report::builder::{Report, ReportBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

// ==========================================
// PipelineOutput - 运行结果
// ==========================================

#[derive(Debug)]
pub struct PipelineOutput {
    pub run_id: Uuid,
    pub global: GlobalAggregate,
    pub stats: ScanStats,
    pub failures: Vec<ImportError>,
    pub report: Report,
}

impl PipelineOutput {
    pub fn summary(&self, files_total: usize) -> RunSummary {
        RunSummary {
            files_total,
            files_processed: self.stats.files_processed,
            files_failed: self.failures.len(),
            distinct_subclasses: self.global.distinct_subclasses(),
            distinct_occupations: self.global.distinct_occupations(),
            rows_read: self.stats.rows_read,
            rows_accepted: self.stats.rows_accepted,
            rows_rejected: self.stats.rows_rejected(),
            rows_malformed: self.stats.rows_malformed,
        }
    }
}

/// 运行摘要（CLI 输出用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_total: usize,
    pub files_processed: u64,
    pub files_failed: usize,
    pub distinct_subclasses: usize,
    pub distinct_occupations: usize,
    pub rows_read: u64,
    pub rows_accepted: u64,
    pub rows_rejected: u64,
    pub rows_malformed: u64,
}

// ==========================================
// AggregationPipeline
// ==========================================

pub struct AggregationPipeline {
    aggregator: Arc<FileAggregator>,
    runner: Box<dyn ShardRunner>,
    error_log: Arc<ErrorLog>,
    workers: usize,
}

impl AggregationPipeline {
    /// 创建流水线
    ///
    /// # 参数
    /// - normalizer: 行规范化规则
    /// - runner: 执行基底（顺序 / 并发）
    /// - error_log: 共享错误日志
    /// - workers: worker 数量（必须 ≥ 1，在 run 时校验）
    pub fn new(
        normalizer: RecordNormalizer,
        runner: Box<dyn ShardRunner>,
        error_log: Arc<ErrorLog>,
        workers: usize,
    ) -> Self {
        let aggregator = Arc::new(FileAggregator::new(normalizer, Arc::clone(&error_log)));
        Self {
            aggregator,
            runner,
            error_log,
            workers,
        }
    }

    /// 按配置选择执行基底
    pub fn from_config(config: &PipelineConfig, error_log: Arc<ErrorLog>) -> Self {
        let runner: Box<dyn ShardRunner> = match config.execution {
            ExecutionMode::Sequential => Box::new(SequentialShardRunner),
            ExecutionMode::Concurrent => Box::new(ConcurrentShardRunner),
        };
        Self::new(
            RecordNormalizer::new(config.rules.clone()),
            runner,
            error_log,
            config.workers,
        )
    }

    /// 执行一次完整聚合
    ///
    /// # 参数
    /// - files: 输入文件（顺序即分片顺序）
    ///
    /// # 返回
    /// - Ok(PipelineOutput): 全局聚合 + 报表行 + 文件级失败列表
    /// - Err: 仅当 worker 数量非法
    pub async fn run(&self, files: Vec<PathBuf>) -> ImportResult<PipelineOutput> {
        let run_id = Uuid::new_v4();
        let shards = partition(&files, self.workers)?;

        info!(
            run_id = %run_id,
            files = files.len(),
            workers = self.workers,
            runner = self.runner.name(),
            "开始聚合"
        );

        let aggregator = Arc::clone(&self.aggregator);
        let error_log = Arc::clone(&self.error_log);
        let task: ShardTask =
            Arc::new(move |shard: Shard| process_shard(&aggregator, &error_log, shard));

        // 屏障：全部 worker 结束后才进入合并
        let outcomes = self.runner.run_shards(shards, task).await;

        let mut failures = Vec::new();
        let mut stats_parts = Vec::with_capacity(outcomes.len());
        let mut aggregates = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            for failure in outcome.failures {
                // 文件级失败已由 worker 写入日志，这里只补记 panic
                if let ImportError::WorkerPanicked { .. } = failure {
                    self.error_log.record(&failure.to_string());
                }
                failures.push(failure);
            }
            stats_parts.push(outcome.stats);
            aggregates.push(outcome.aggregate);
        }

        let stats = merge_reducer::reduce_stats(stats_parts.iter());
        let global = merge_reducer::reduce(aggregates);
        let report = ReportBuilder.build(&global);

        info!(
            run_id = %run_id,
            files_processed = stats.files_processed,
            files_failed = failures.len(),
            rows = stats.rows_read,
            accepted = stats.rows_accepted,
            rejected = stats.rows_rejected(),
            subclasses = global.distinct_subclasses(),
            occupations = global.distinct_occupations(),
            "聚合完成"
        );

        Ok(PipelineOutput {
            run_id,
            global,
            stats,
            failures,
            report,
        })
    }
}

/// 单个 worker：依次处理分片内的文件，只写本分片的局部聚合
fn process_shard(aggregator: &FileAggregator, error_log: &ErrorLog, shard: Shard) -> ShardOutcome {
    let mut outcome = ShardOutcome::new(shard.worker);
    debug!(worker = shard.worker, files = shard.len(), "worker 启动");

    for path in &shard.files {
        let result = reporting_date_for(path).and_then(|date| {
            if !is_calendar_date(&date) {
                warn!(file = %path.display(), reporting_date = %date, "参考日期不是合法日历日期");
            }
            aggregator.aggregate_file(path, &date)
        });

        match result {
            Ok(file_aggregate) => {
                outcome.aggregate.merge(file_aggregate.aggregate);
                outcome.stats.merge(&file_aggregate.stats);
            }
            Err(e) => {
                if e.is_file_level() {
                    warn!(worker = shard.worker, file = %path.display(), error = %e, "文件被跳过");
                    error_log.record(&format!("文件被跳过: {}: {}", path.display(), e));
                } else {
                    error!(worker = shard.worker, file = %path.display(), error = %e, "文件处理异常");
                    error_log.record(&format!("文件处理异常: {}: {}", path.display(), e));
                }
                outcome.failures.push(e);
            }
        }
    }

    debug!(
        worker = shard.worker,
        files = outcome.stats.files_processed,
        failed = outcome.failures.len(),
        "worker 完成"
    );
    outcome
}

/// 列出输入目录下的常规文件（按文件名排序）
pub fn list_input_files(dir: &Path) -> ImportResult<Vec<PathBuf>> {
    let to_error = |e: std::io::Error| ImportError::InputDirError {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(to_error)? {
        let entry = entry.map_err(to_error)?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
