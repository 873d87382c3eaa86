// ==========================================
// CAGED 招聘薪资聚合 - 记录规范化器
// ==========================================
// 职责: RawRecord → NormalizedObservation | RejectReason
// 流程（按顺序，任一失败即拒绝该行）:
//   1. saldomovimentação 必须为 "1"（招聘事件）
//   2. 子类 / 职业键 = TRIM 后的原始字符串（允许为空）
//   3. 薪资非空，逗号小数 → 点小数后解析
//   4. 按薪资单位折算为月薪，并校验合理区间 [1000, 25000]
//   5. 年龄非空、非负整数，且必须落入某个年龄段
// 红线: 单行解析失败只拒绝该行，从不中断文件
// ==========================================

use crate::domain::observation::{NormalizedObservation, RawRecord};
use crate::domain::types::PayUnit;
use crate::engine::age_bracketer::AgeBracketer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 招聘事件标记
pub const HIRING_FLAG: &str = "1";

// ==========================================
// RejectReason - 行级拒绝原因
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectReason {
    #[error("非招聘记录 (saldomovimentação = {0:?})")]
    NotHiring(String),

    #[error("薪资为空")]
    MissingSalary,

    #[error("薪资无法解析: {0:?}")]
    InvalidSalary(String),

    #[error("不支持的薪资单位: {0}")]
    UnsupportedPayUnit(String),

    #[error("未知的薪资单位: {0:?}")]
    UnknownPayUnit(String),

    #[error("合同工时为空")]
    MissingHours,

    #[error("合同工时无法解析: {0:?}")]
    InvalidHours(String),

    #[error("合同工时不足: {hours} < {min}")]
    InsufficientHours { hours: i64, min: i64 },

    #[error("月薪超出合理区间: {value} 不在 [{min}, {max}]")]
    OutOfBand { value: f64, min: f64, max: f64 },

    #[error("年龄为空")]
    MissingAge,

    #[error("年龄无法解析: {0:?}")]
    InvalidAge(String),

    #[error("年龄不在任何年龄段: {0}")]
    AgeOutOfRange(u32),
}

impl RejectReason {
    /// 稳定的原因代码（用作计数键）
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::NotHiring(_) => "not_hiring",
            RejectReason::MissingSalary => "missing_salary",
            RejectReason::InvalidSalary(_) => "invalid_salary",
            RejectReason::UnsupportedPayUnit(_) => "unsupported_pay_unit",
            RejectReason::UnknownPayUnit(_) => "unknown_pay_unit",
            RejectReason::MissingHours => "missing_hours",
            RejectReason::InvalidHours(_) => "invalid_hours",
            RejectReason::InsufficientHours { .. } => "insufficient_hours",
            RejectReason::OutOfBand { .. } => "out_of_band",
            RejectReason::MissingAge => "missing_age",
            RejectReason::InvalidAge(_) => "invalid_age",
            RejectReason::AgeOutOfRange(_) => "age_out_of_range",
        }
    }
}

// ==========================================
// NormalizerRules - 规范化参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerRules {
    pub min_monthly_salary: f64,
    pub max_monthly_salary: f64,
    pub min_contracted_hours: i64,
    pub weeks_per_month: f64,
    pub biweekly_factor: f64,
}

impl Default for NormalizerRules {
    fn default() -> Self {
        Self {
            min_monthly_salary: 1000.0,
            max_monthly_salary: 25000.0,
            min_contracted_hours: 20,
            weeks_per_month: 4.33,
            biweekly_factor: 2.0,
        }
    }
}

// ==========================================
// RecordNormalizer
// ==========================================
#[derive(Default)]
pub struct RecordNormalizer {
    rules: NormalizerRules,
    bracketer: AgeBracketer,
}

impl RecordNormalizer {
    pub fn new(rules: NormalizerRules) -> Self {
        Self {
            rules,
            bracketer: AgeBracketer,
        }
    }

    pub fn rules(&self) -> &NormalizerRules {
        &self.rules
    }

    /// 规范化一条原始记录
    pub fn normalize(&self, record: &RawRecord) -> Result<NormalizedObservation, RejectReason> {
        // 1. 招聘事件
        if record.movement_flag != HIRING_FLAG {
            return Err(RejectReason::NotHiring(record.movement_flag.clone()));
        }

        // 2. 键
        let subclass_key = record.subclass.trim().to_string();
        let occupation_key = record.occupation.trim().to_string();

        // 3. 薪资
        let salary_raw = record.salary.trim();
        if salary_raw.is_empty() {
            return Err(RejectReason::MissingSalary);
        }
        let salary = parse_decimal(salary_raw)
            .ok_or_else(|| RejectReason::InvalidSalary(salary_raw.to_string()))?;

        // 4. 月薪折算 + 区间校验
        let pay_unit = PayUnit::from_code(&record.pay_unit_code);
        let monthly_salary = self.monthly_salary(salary, &pay_unit, &record.contracted_hours)?;

        // 5. 年龄
        let age = parse_age(&record.age)?;
        let age_bracket = self
            .bracketer
            .bracket(age)
            .ok_or(RejectReason::AgeOutOfRange(age))?;

        Ok(NormalizedObservation {
            subclass_key,
            occupation_key,
            monthly_salary,
            age,
            age_bracket,
        })
    }

    /// 按薪资单位折算月薪
    fn monthly_salary(
        &self,
        salary: f64,
        pay_unit: &PayUnit,
        contracted_hours: &str,
    ) -> Result<f64, RejectReason> {
        let monthly = match pay_unit {
            PayUnit::Unsupported(code) => {
                return Err(RejectReason::UnsupportedPayUnit(code.clone()))
            }
            PayUnit::Unknown(code) => return Err(RejectReason::UnknownPayUnit(code.clone())),
            PayUnit::Monthly => salary,
            PayUnit::Hourly => {
                let hours = self.parse_hours(contracted_hours)?;
                salary * (hours as f64 * self.rules.weeks_per_month)
            }
            PayUnit::Weekly => salary * self.rules.weeks_per_month,
            PayUnit::Biweekly => salary * self.rules.biweekly_factor,
        };

        self.check_band(monthly)
    }

    /// 合同工时：逗号小数解析后向零截断，不足下限拒绝
    fn parse_hours(&self, raw: &str) -> Result<i64, RejectReason> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RejectReason::MissingHours);
        }
        let hours = parse_decimal(trimmed)
            .ok_or_else(|| RejectReason::InvalidHours(trimmed.to_string()))?
            .trunc() as i64;

        if hours < self.rules.min_contracted_hours {
            return Err(RejectReason::InsufficientHours {
                hours,
                min: self.rules.min_contracted_hours,
            });
        }
        Ok(hours)
    }

    /// 闭区间校验
    fn check_band(&self, monthly: f64) -> Result<f64, RejectReason> {
        let (min, max) = (self.rules.min_monthly_salary, self.rules.max_monthly_salary);
        if monthly < min || monthly > max {
            Err(RejectReason::OutOfBand {
                value: monthly,
                min,
                max,
            })
        } else {
            Ok(monthly)
        }
    }
}

/// 逗号小数 → 点小数后解析（非有限值视为无法解析）
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_age(raw: &str) -> Result<u32, RejectReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RejectReason::MissingAge);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| RejectReason::InvalidAge(trimmed.to_string()))
}
