// ==========================================
// CAGED 招聘薪资聚合 - 配置层
// ==========================================
// 职责: 运行配置管理，支持多级覆写
// 来源: 默认值 / JSON 文件 / 环境变量 / 命令行
// ==========================================

pub mod pipeline_config;

// 重导出核心配置类型
pub use pipeline_config::{config_keys, default_workers, ConfigError, ExecutionMode, PipelineConfig};
