// ==========================================
// CAGED 招聘薪资聚合 - 引擎层
// ==========================================
// 职责: 分片、执行、合并、编排
// 红线: 聚合核心只有一份，顺序 / 并发仅是执行基底的差异
// ==========================================

pub mod age_bracketer;
pub mod merge_reducer;
pub mod orchestrator;
pub mod partitioner;
pub mod shard_runner;

// 重导出核心组件
pub use age_bracketer::AgeBracketer;
pub use merge_reducer::{reduce, reduce_stats, tree_reduce};
pub use orchestrator::{list_input_files, AggregationPipeline, PipelineOutput, RunSummary};
pub use partitioner::{partition, Shard};
pub use shard_runner::{
    ConcurrentShardRunner, SequentialShardRunner, ShardOutcome, ShardRunner, ShardTask,
};
