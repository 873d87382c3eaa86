// ==========================================
// CAGED 招聘薪资聚合 - 分片执行器
// ==========================================
// 职责: run_shards(shards, task) → 每个分片一个 ShardOutcome
// 实现:
//   - SequentialShardRunner: 在调用方任务内依次执行（参考实现）
//   - ConcurrentShardRunner: 每个分片一个 spawn_blocking，join_all 汇合
// 红线: 扫描阶段 worker 之间无共享可变状态、无锁、无通信
// 红线: 单个 worker 失败（含 panic）不影响其他 worker
// ==========================================

use crate::domain::aggregate::{Aggregate, ScanStats};
use crate::engine::partitioner::Shard;
use crate::importer::error::ImportError;
use async_trait::async_trait;
use futures::future::join_all;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info};

/// 单个分片的执行结果
#[derive(Debug, Default)]
pub struct ShardOutcome {
    pub worker: usize,
    pub aggregate: Aggregate,
    pub stats: ScanStats,
    pub failures: Vec<ImportError>,
}

impl ShardOutcome {
    pub fn new(worker: usize) -> Self {
        Self {
            worker,
            ..Self::default()
        }
    }

    pub fn panicked(worker: usize, message: String) -> Self {
        Self {
            worker,
            failures: vec![ImportError::WorkerPanicked { worker, message }],
            ..Self::default()
        }
    }
}

/// 分片任务（所有 worker 共享同一份聚合逻辑）
pub type ShardTask = Arc<dyn Fn(Shard) -> ShardOutcome + Send + Sync>;

// ==========================================
// ShardRunner Trait
// ==========================================
#[async_trait]
pub trait ShardRunner: Send + Sync {
    /// 执行全部分片并在屏障处汇合
    ///
    /// # 返回
    /// - Vec<ShardOutcome>: 与输入分片一一对应，按 worker 顺序排列
    async fn run_shards(&self, shards: Vec<Shard>, task: ShardTask) -> Vec<ShardOutcome>;

    /// 执行器名称（日志用）
    fn name(&self) -> &'static str;
}

// ==========================================
// SequentialShardRunner
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialShardRunner;

#[async_trait]
impl ShardRunner for SequentialShardRunner {
    async fn run_shards(&self, shards: Vec<Shard>, task: ShardTask) -> Vec<ShardOutcome> {
        shards
            .into_iter()
            .map(|shard| {
                let worker = shard.worker;
                panic::catch_unwind(AssertUnwindSafe(|| task(shard))).unwrap_or_else(|payload| {
                    let message = panic_message(payload.as_ref());
                    error!(worker, error = %message, "worker 异常退出");
                    ShardOutcome::panicked(worker, message)
                })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}

// ==========================================
// ConcurrentShardRunner
// ==========================================
// 扫描以同步文件 IO 为主，放入 blocking 线程池
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcurrentShardRunner;

#[async_trait]
impl ShardRunner for ConcurrentShardRunner {
    async fn run_shards(&self, shards: Vec<Shard>, task: ShardTask) -> Vec<ShardOutcome> {
        info!(workers = shards.len(), "启动并发 worker");

        let handles = shards.into_iter().map(|shard| {
            let worker = shard.worker;
            let task = Arc::clone(&task);
            let handle = tokio::task::spawn_blocking(move || task(shard));
            async move {
                match handle.await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        let message = if e.is_panic() {
                            panic_message(e.into_panic().as_ref())
                        } else {
                            e.to_string()
                        };
                        error!(worker, error = %message, "worker 异常退出");
                        ShardOutcome::panicked(worker, message)
                    }
                }
            }
        });

        // join_all 保持输入顺序，与完成先后无关
        join_all(handles).await
    }

    fn name(&self) -> &'static str {
        "concurrent"
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
