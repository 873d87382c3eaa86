// ==========================================
// CAGED 招聘薪资聚合 - 记录与观测值
// ==========================================
// 职责: 原始行记录 (RawRecord) 与规范化观测值 (NormalizedObservation)
// ==========================================

use crate::domain::types::AgeBracket;
use serde::{Deserialize, Serialize};

// ==========================================
// RawRecord - 原始行记录
// ==========================================
// 仅在单个文件扫描期间存在；缺失的列以空字符串表示
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub subclass: String, // subclasse
    pub occupation: String, // cbo2002ocupação
    pub movement_flag: String, // saldomovimentação
    pub salary: String, // salário（逗号小数）
    pub pay_unit_code: String, // unidadesaláriocódigo
    pub contracted_hours: String, // horascontratuais（逗号小数）
    pub age: String, // idade

    // 元信息
    pub line_number: u64,
}

// ==========================================
// NormalizedObservation - 规范化观测值
// ==========================================
// 由一条被接受的 RawRecord 产生，不可变，直接进入聚合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedObservation {
    pub subclass_key: String,
    pub occupation_key: String,
    pub monthly_salary: f64,
    pub age: u32,
    pub age_bracket: AgeBracket,
}
