// ==========================================
// CAGED 招聘薪资聚合 - 运行配置
// ==========================================
// 职责: 配置加载与多级覆写
// 层级: 默认值 → JSON 配置文件 → 环境变量 → 命令行参数
// 红线: validate() 通过之前不得启动流水线
// ==========================================

use crate::importer::record_normalizer::NormalizerRules;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("环境变量 {key} 取值非法: {value}")]
    InvalidEnvValue { key: String, value: String },

    #[error("worker 数量必须 ≥ 1")]
    ZeroWorkers,

    #[error("配置项 {0} 不能为空")]
    EmptyPath(&'static str),

    #[error("未知执行模式: {0}")]
    UnknownExecutionMode(String),
}

/// 执行基底
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    #[default]
    Concurrent,
}

impl FromStr for ExecutionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "concurrent" => Ok(ExecutionMode::Concurrent),
            other => Err(ConfigError::UnknownExecutionMode(other.to_string())),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Concurrent => write!(f, "concurrent"),
        }
    }
}

// ==========================================
// PipelineConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub error_log_path: PathBuf,
    pub subclass_report_file: String,
    pub occupation_report_file: String,
    pub workers: usize,
    pub execution: ExecutionMode,
    pub rules: NormalizerRules,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./CAGEDMOV_downloads"),
            output_dir: PathBuf::from("output_caged"),
            error_log_path: PathBuf::from("log_CAGEDERRORS.txt"),
            subclass_report_file: "subclasse_output.csv".to_string(),
            occupation_report_file: "ocupacoes_output.csv".to_string(),
            workers: default_workers(),
            execution: ExecutionMode::default(),
            rules: NormalizerRules::default(),
        }
    }
}

/// 默认 worker 数 = 可用并行度
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl PipelineConfig {
    /// 从 JSON 文件加载（缺省字段取默认值）
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写（lookup 可注入，便于测试）
    ///
    /// # 参数
    /// - lookup: 键 → 取值（未设置返回 None）
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(config_keys::INPUT_DIR) {
            self.input_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(config_keys::OUTPUT_DIR) {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(config_keys::ERROR_LOG) {
            self.error_log_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(config_keys::WORKERS) {
            self.workers = v.trim().parse().map_err(|_| ConfigError::InvalidEnvValue {
                key: config_keys::WORKERS.to_string(),
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup(config_keys::EXECUTION) {
            self.execution = v.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.input_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("input_dir"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("output_dir"));
        }
        if self.error_log_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("error_log_path"));
        }
        if self.subclass_report_file.trim().is_empty() {
            return Err(ConfigError::EmptyPath("subclass_report_file"));
        }
        if self.occupation_report_file.trim().is_empty() {
            return Err(ConfigError::EmptyPath("occupation_report_file"));
        }
        Ok(())
    }

    pub fn subclass_report_path(&self) -> PathBuf {
        self.output_dir.join(&self.subclass_report_file)
    }

    pub fn occupation_report_path(&self) -> PathBuf {
        self.output_dir.join(&self.occupation_report_file)
    }
}

// ==========================================
// 环境变量键
// ==========================================
pub mod config_keys {
    pub const INPUT_DIR: &str = "CAGED_INPUT_DIR";
    pub const OUTPUT_DIR: &str = "CAGED_OUTPUT_DIR";
    pub const ERROR_LOG: &str = "CAGED_ERROR_LOG";
    pub const WORKERS: &str = "CAGED_WORKERS";
    pub const EXECUTION: &str = "CAGED_EXECUTION"; // sequential | concurrent
}
