// ==========================================
// CAGED 招聘薪资聚合 - 导入层
// ==========================================
// 职责: 单个文件 → 文件级聚合
// 流程: 参考日期推导 → 表头校验 → 字段映射 → 规范化 → 累加
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_aggregator;
pub mod file_date;
pub mod file_parser;
pub mod record_normalizer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{ColumnLayout, REQUIRED_COLUMNS};
pub use file_aggregator::{FileAggregate, FileAggregator};
pub use file_date::{derive_reporting_date, reporting_date_for};
pub use file_parser::{CsvRecordReader, ParsedRow};
pub use record_normalizer::{NormalizerRules, RecordNormalizer, RejectReason};
