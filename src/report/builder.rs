// ==========================================
// CAGED 招聘薪资聚合 - 报表构建器
// ==========================================
// 职责: 全局聚合 → 两张报表（子类 / 职业）的行
// 规则:
//   - media_salarial_geral = salary_sum / count
//   - media_idade_geral    = age_sum / count
//   - 各年龄段平均薪资；该段 count 为 0 时输出 0.00
//   - id 按输出顺序从 1 严格递增
//   - 所有数值保留两位小数
// ==========================================

use crate::domain::aggregate::{AggregateKey, GlobalAggregate, KeyAggregate};
use crate::domain::types::AgeBracket;
use std::collections::BTreeMap;

/// 报表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Subclass,
    Occupation,
}

impl ReportKind {
    /// 键列名
    pub fn key_column(self) -> &'static str {
        match self {
            ReportKind::Subclass => "cnae",
            ReportKind::Occupation => "ocupacao",
        }
    }

    /// 完整表头
    pub fn header(self) -> Vec<&'static str> {
        let mut header = vec!["id", self.key_column(), "media_salarial_geral"];
        header.extend(AgeBracket::ALL.iter().map(|b| b.label()));
        header.push("media_idade_geral");
        header.push("date");
        header
    }
}

/// 报表行
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub id: u64,
    pub key: String,
    pub average_salary: f64,
    pub bracket_averages: [f64; 5],
    pub average_age: f64,
    pub reporting_date: String,
}

impl ReportRow {
    /// 渲染为单元格（与表头一一对应）
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(10);
        cells.push(self.id.to_string());
        cells.push(self.key.clone());
        cells.push(format_amount(self.average_salary));
        cells.extend(self.bracket_averages.iter().map(|v| format_amount(*v)));
        cells.push(format_amount(self.average_age));
        cells.push(self.reporting_date.clone());
        cells
    }
}

/// 两张报表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub subclass_rows: Vec<ReportRow>,
    pub occupation_rows: Vec<ReportRow>,
}

impl Report {
    pub fn rows(&self, kind: ReportKind) -> &[ReportRow] {
        match kind {
            ReportKind::Subclass => &self.subclass_rows,
            ReportKind::Occupation => &self.occupation_rows,
        }
    }
}

pub struct ReportBuilder;

impl ReportBuilder {
    pub fn build(&self, global: &GlobalAggregate) -> Report {
        Report {
            subclass_rows: self.build_rows(&global.subclasses),
            occupation_rows: self.build_rows(&global.occupations),
        }
    }

    /// 按键顺序（参考日期 → 代码）生成行
    pub fn build_rows(&self, aggregates: &BTreeMap<AggregateKey, KeyAggregate>) -> Vec<ReportRow> {
        aggregates
            .iter()
            .filter(|(_, agg)| agg.count() > 0)
            .enumerate()
            .map(|(idx, (key, agg))| ReportRow {
                id: idx as u64 + 1,
                key: key.code.clone(),
                average_salary: agg.average_salary().unwrap_or(0.0),
                bracket_averages: AgeBracket::ALL
                    .map(|bracket| agg.bracket_average_salary(bracket).unwrap_or(0.0)),
                average_age: agg.average_age().unwrap_or(0.0),
                reporting_date: key.reporting_date.clone(),
            })
            .collect()
    }
}

/// 两位小数定点字符串
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}
