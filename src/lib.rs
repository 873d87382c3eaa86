// ==========================================
// CAGED 招聘薪资聚合 - 核心库
// ==========================================
// 输入: CAGED 月度变动文件目录（';' 分隔）
// 输出: 按 CNAE 子类 / CBO 职业汇总的招聘薪资报表
// 执行: 固定 worker 池分片扫描 → 屏障 → 合并归约
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 观测值与聚合
pub mod domain;

// 导入层 - 单文件扫描
pub mod importer;

// 引擎层 - 分片 / 执行 / 合并
pub mod engine;

// 报表层 - 输出表
pub mod report;

// 配置层 - 运行配置
pub mod config;

// 错误日志（跨 worker 共享）
pub mod error_log;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AgeBracket, Aggregate, AggregateKey, GlobalAggregate, KeyAggregate, NormalizedObservation,
    PayUnit, RawRecord, ScanStats,
};

// 导入
pub use importer::{FileAggregator, ImportError, ImportResult, RecordNormalizer, RejectReason};

// 引擎
pub use engine::{
    list_input_files, AggregationPipeline, ConcurrentShardRunner, PipelineOutput, RunSummary,
    SequentialShardRunner, ShardRunner,
};

// 报表
pub use report::{Report, ReportBuilder, ReportWriter};

// 配置
pub use config::{ConfigError, ExecutionMode, PipelineConfig};

pub use error_log::ErrorLog;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "CAGED 招聘薪资聚合";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
