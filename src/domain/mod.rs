// ==========================================
// CAGED 招聘薪资聚合 - 领域模型层
// ==========================================
// 职责: 定义记录、观测值、年龄段与聚合值类型
// 红线: 不含文件读写逻辑,不含并发调度逻辑
// ==========================================

pub mod aggregate;
pub mod observation;
pub mod types;

// 重导出核心类型
pub use aggregate::{
    Aggregate, AggregateKey, BracketStats, GlobalAggregate, KeyAggregate, SalarySum, ScanStats,
};
pub use observation::{NormalizedObservation, RawRecord};
pub use types::{AgeBracket, PayUnit};
