// ==========================================
// CAGED 招聘薪资聚合 - 命令行入口
// ==========================================
// 职责: 配置加载 → 输出目录 / 错误日志准备 → 运行流水线 → 写报表 → 打印摘要
// 红线: 核心库不做目录创建、计时、输出打印，这些都在这里完成
// ==========================================

use anyhow::{Context, Result};
use caged_salary_report::config::{ExecutionMode, PipelineConfig};
use caged_salary_report::engine::{list_input_files, AggregationPipeline};
use caged_salary_report::error_log::ErrorLog;
use caged_salary_report::logging::{self, LogFormat};
use caged_salary_report::perf::PerfGuard;
use caged_salary_report::report::ReportWriter;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "caged-salary-report", version, about = "CAGED 招聘薪资聚合报表")]
struct Cli {
    /// 输入目录（CAGED 月度变动文件）
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// 输出目录
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// worker 数量（默认: 可用并行度）
    #[arg(long)]
    workers: Option<usize>,

    /// 顺序执行（单任务内依次处理分片）
    #[arg(long)]
    sequential: bool,

    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 错误日志路径
    #[arg(long)]
    error_log: Option<PathBuf>,

    /// 以 JSON 格式输出 tracing 日志
    #[arg(long)]
    json_log: bool,
}

impl Cli {
    /// 按 默认值 → JSON → 环境变量 → 命令行 的顺序合成配置
    fn load_config(&self) -> Result<PipelineConfig> {
        self.load_config_from(|key| std::env::var(key).ok())
    }

    /// 同 load_config，环境变量由 lookup 提供
    fn load_config_from<F>(&self, lookup: F) -> Result<PipelineConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        config.apply_env_from(lookup)?;

        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.sequential {
            config.execution = ExecutionMode::Sequential;
        }
        if let Some(path) = &self.error_log {
            config.error_log_path = path.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with(if cli.json_log {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    let config = cli.load_config()?;
    let perf = PerfGuard::new("caged_run");

    info!(
        version = caged_salary_report::VERSION,
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        workers = config.workers,
        execution = %config.execution,
        "{}",
        caged_salary_report::APP_NAME
    );

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("无法创建输出目录: {}", config.output_dir.display()))?;
    let error_log = Arc::new(ErrorLog::open(&config.error_log_path)?);

    let files = list_input_files(&config.input_dir)?;
    if files.is_empty() {
        warn!(input_dir = %config.input_dir.display(), "输入目录为空");
    }
    let files_total = files.len();

    let pipeline = AggregationPipeline::from_config(&config, Arc::clone(&error_log));
    let output = pipeline.run(files).await?;

    ReportWriter.write_report(
        &output.report,
        &config.subclass_report_path(),
        &config.occupation_report_path(),
    )?;

    let summary = output.summary(files_total);
    println!("Subclasses distintas: {}", summary.distinct_subclasses);
    println!("Ocupações distintas: {}", summary.distinct_occupations);
    println!(
        "Arquivos: {} processados, {} ignorados",
        summary.files_processed, summary.files_failed
    );
    println!(
        "Linhas: {} lidas, {} aceitas, {} rejeitadas, {} malformadas",
        summary.rows_read, summary.rows_accepted, summary.rows_rejected, summary.rows_malformed
    );
    println!("Tempo decorrido: {:.2}s", perf.elapsed().as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caged_salary_report::config::config_keys;

    #[test]
    fn test_cli_overrides_take_precedence() {
        let cli = Cli::parse_from([
            "caged-salary-report",
            "--input-dir",
            "/dados/entrada",
            "--workers",
            "3",
            "--sequential",
        ]);
        let config = cli.load_config_from(|_: &str| None).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/dados/entrada"));
        assert_eq!(config.workers, 3);
        assert_eq!(config.execution, ExecutionMode::Sequential);
    }

    #[test]
    fn test_cli_flags_beat_environment() {
        let cli = Cli::parse_from(["caged-salary-report", "--workers", "2", "--sequential"]);
        let config = cli
            .load_config_from(|key: &str| match key {
                config_keys::WORKERS => Some("7".to_string()),
                config_keys::EXECUTION => Some("concurrent".to_string()),
                config_keys::OUTPUT_DIR => Some("/tmp/saida".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.execution, ExecutionMode::Sequential);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/saida"));
    }

    #[test]
    fn test_cli_zero_workers_rejected() {
        let cli = Cli::parse_from(["caged-salary-report", "--workers", "0"]);
        assert!(cli.load_config_from(|_: &str| None).is_err());
    }
}
