// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成 CAGED 格式的测试文件、运行流水线并读回报表
// ==========================================

#![allow(dead_code)]

use caged_salary_report::engine::{AggregationPipeline, PipelineOutput, ShardRunner};
use caged_salary_report::error_log::ErrorLog;
use caged_salary_report::importer::RecordNormalizer;
use caged_salary_report::report::ReportWriter;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 真实 CAGED 变动文件的完整表头（含聚合不使用的列）
pub const CAGED_HEADER: &str = "competênciamov;região;uf;município;seção;subclasse;saldomovimentação;cbo2002ocupação;categoria;graudeinstrução;idade;horascontratuais;raçacor;sexo;tipoempregador;tipoestabelecimento;tipomovimentação;tipodedeficiência;indtrabintermitente;indtrabparcial;salário;tamestabjan;indicadoraprendiz;origemdainformação;competênciadec;indicadordeforadoprazo;unidadesaláriocódigo;valorsaláriofixo";

/// 一行变动记录（默认: 招聘、月薪、44 小时）
#[derive(Debug, Clone)]
pub struct CagedRow {
    pub subclass: String,
    pub occupation: String,
    pub movement_flag: String,
    pub salary: String,
    pub age: String,
    pub pay_unit: String,
    pub hours: String,
}

impl CagedRow {
    pub fn hire(subclass: &str, occupation: &str, salary: &str, age: &str) -> Self {
        Self {
            subclass: subclass.to_string(),
            occupation: occupation.to_string(),
            movement_flag: "1".to_string(),
            salary: salary.to_string(),
            age: age.to_string(),
            pay_unit: "5".to_string(),
            hours: "44".to_string(),
        }
    }

    pub fn unit(mut self, code: &str) -> Self {
        self.pay_unit = code.to_string();
        self
    }

    pub fn hours(mut self, hours: &str) -> Self {
        self.hours = hours.to_string();
        self
    }

    pub fn flag(mut self, flag: &str) -> Self {
        self.movement_flag = flag.to_string();
        self
    }

    /// 按 CAGED_HEADER 的列顺序渲染
    pub fn render(&self) -> String {
        [
            "202301",
            "3",
            "35",
            "355030",
            "G",
            self.subclass.as_str(),
            self.movement_flag.as_str(),
            self.occupation.as_str(),
            "101",
            "7",
            self.age.as_str(),
            self.hours.as_str(),
            "1",
            "1",
            "0",
            "1",
            "10",
            "0",
            "0",
            "0",
            self.salary.as_str(),
            "5",
            "0",
            "1",
            "202301",
            "0",
            self.pay_unit.as_str(),
            self.salary.as_str(),
        ]
        .join(";")
    }
}

/// 在目录下写一个 CAGED 文件
pub fn write_caged_file(dir: &Path, name: &str, rows: &[CagedRow]) -> PathBuf {
    let mut content = String::from(CAGED_HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(&row.render());
        content.push('\n');
    }
    write_raw_file(dir, name, &content)
}

/// 在目录下写任意内容的文件
pub fn write_raw_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("写测试文件失败");
    path
}

/// 构建流水线
pub fn create_pipeline(
    runner: Box<dyn ShardRunner>,
    workers: usize,
    error_log: Arc<ErrorLog>,
) -> AggregationPipeline {
    AggregationPipeline::new(RecordNormalizer::default(), runner, error_log, workers)
}

/// 报表文本（子类, 职业）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTexts {
    pub subclass: String,
    pub occupation: String,
}

/// 写出报表并读回文本
pub fn write_and_read_reports(output: &PipelineOutput, out_dir: &Path) -> ReportTexts {
    fs::create_dir_all(out_dir).expect("创建输出目录失败");
    let subclass_path = out_dir.join("subclasse_output.csv");
    let occupation_path = out_dir.join("ocupacoes_output.csv");
    ReportWriter
        .write_report(&output.report, &subclass_path, &occupation_path)
        .expect("写报表失败");

    ReportTexts {
        subclass: fs::read_to_string(subclass_path).expect("读子类报表失败"),
        occupation: fs::read_to_string(occupation_path).expect("读职业报表失败"),
    }
}

/// 报表数据行（去掉表头），按 ';' 切分
pub fn data_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .skip(1)
        .map(|line| line.split(';').map(str::to_string).collect())
        .collect()
}
