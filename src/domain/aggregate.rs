// ==========================================
// CAGED 招聘薪资聚合 - 聚合值类型
// ==========================================
// 职责: KeyAggregate / Aggregate / ScanStats 及其合并运算
// 红线: 只允许累加（record）与合并（merge），从不递减
// 红线: 合并必须满足结合律与交换律（薪资和使用定点整数）
// ==========================================

use crate::domain::observation::NormalizedObservation;
use crate::domain::types::AgeBracket;
use std::collections::{BTreeMap, BTreeSet};

/// 薪资定点精度：1e-6
pub const SALARY_SCALE: i128 = 1_000_000;

// ==========================================
// SalarySum - 定点薪资和
// ==========================================
// 浮点加法不满足结合律，整数加法满足
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SalarySum(i128);

impl SalarySum {
    pub fn from_amount(amount: f64) -> Self {
        Self((amount * SALARY_SCALE as f64).round() as i128)
    }

    pub fn add(&mut self, other: SalarySum) {
        self.0 += other.0;
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / SALARY_SCALE as f64
    }

    /// 平均值（count 为 0 时返回 None）
    pub fn average(self, count: u64) -> Option<f64> {
        if count == 0 {
            None
        } else {
            Some(self.as_f64() / count as f64)
        }
    }
}

// ==========================================
// BracketStats - 单个年龄段统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BracketStats {
    pub count: u64,
    pub salary_sum: SalarySum,
}

impl BracketStats {
    fn merge(&mut self, other: &BracketStats) {
        self.count += other.count;
        self.salary_sum.add(other.salary_sum);
    }
}

// ==========================================
// KeyAggregate - 单个键（子类 / 职业）的统计
// ==========================================
// 不变量: count == Σ per_bracket[*].count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyAggregate {
    count: u64,
    salary_sum: SalarySum,
    age_sum: u64,
    per_bracket: [BracketStats; 5],
}

impl KeyAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一条观测值
    pub fn record(&mut self, salary: SalarySum, age: u32, bracket: AgeBracket) {
        self.count += 1;
        self.salary_sum.add(salary);
        self.age_sum += u64::from(age);

        let stats = &mut self.per_bracket[bracket.index()];
        stats.count += 1;
        stats.salary_sum.add(salary);
    }

    /// 逐元素合并另一个 KeyAggregate
    pub fn merge(&mut self, other: &KeyAggregate) {
        self.count += other.count;
        self.salary_sum.add(other.salary_sum);
        self.age_sum += other.age_sum;
        for (mine, theirs) in self.per_bracket.iter_mut().zip(other.per_bracket.iter()) {
            mine.merge(theirs);
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn salary_sum(&self) -> SalarySum {
        self.salary_sum
    }

    pub fn age_sum(&self) -> u64 {
        self.age_sum
    }

    pub fn bracket(&self, bracket: AgeBracket) -> &BracketStats {
        &self.per_bracket[bracket.index()]
    }

    pub fn average_salary(&self) -> Option<f64> {
        self.salary_sum.average(self.count)
    }

    pub fn average_age(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.age_sum as f64 / self.count as f64)
        }
    }

    pub fn bracket_average_salary(&self, bracket: AgeBracket) -> Option<f64> {
        let stats = self.bracket(bracket);
        stats.salary_sum.average(stats.count)
    }

    /// 校验 count 与各年龄段 count 之和一致
    pub fn is_consistent(&self) -> bool {
        self.count == self.per_bracket.iter().map(|b| b.count).sum::<u64>()
    }
}

// ==========================================
// AggregateKey - 聚合键
// ==========================================
// 排序: 先按参考日期，再按代码（决定报表输出顺序）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregateKey {
    pub reporting_date: String,
    pub code: String,
}

impl AggregateKey {
    pub fn new(reporting_date: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            reporting_date: reporting_date.into(),
            code: code.into(),
        }
    }
}

// ==========================================
// Aggregate - 文件 / 分片 / 全局聚合
// ==========================================
// 文件级、分片级与全局聚合形状相同，仅覆盖范围不同
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub subclasses: BTreeMap<AggregateKey, KeyAggregate>,
    pub occupations: BTreeMap<AggregateKey, KeyAggregate>,
}

/// 合并完成后的只读全局聚合
pub type GlobalAggregate = Aggregate;

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 将一条观测值同时累加到子类键与职业键
    pub fn record(&mut self, reporting_date: &str, observation: &NormalizedObservation) {
        let salary = SalarySum::from_amount(observation.monthly_salary);

        self.subclasses
            .entry(AggregateKey::new(reporting_date, observation.subclass_key.as_str()))
            .or_default()
            .record(salary, observation.age, observation.age_bracket);

        self.occupations
            .entry(AggregateKey::new(reporting_date, observation.occupation_key.as_str()))
            .or_default()
            .record(salary, observation.age, observation.age_bracket);
    }

    /// 合并另一个聚合（消费 other）
    pub fn merge(&mut self, other: Aggregate) {
        merge_key_map(&mut self.subclasses, other.subclasses);
        merge_key_map(&mut self.occupations, other.occupations);
    }

    /// 纯函数形式的合并
    pub fn merged(mut self, other: Aggregate) -> Aggregate {
        self.merge(other);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.subclasses.is_empty() && self.occupations.is_empty()
    }

    /// 不同子类代码数（跨参考日期去重）
    pub fn distinct_subclasses(&self) -> usize {
        distinct_codes(&self.subclasses)
    }

    /// 不同职业代码数（跨参考日期去重）
    pub fn distinct_occupations(&self) -> usize {
        distinct_codes(&self.occupations)
    }
}

fn merge_key_map(
    target: &mut BTreeMap<AggregateKey, KeyAggregate>,
    source: BTreeMap<AggregateKey, KeyAggregate>,
) {
    for (key, aggregate) in source {
        match target.get_mut(&key) {
            Some(existing) => existing.merge(&aggregate),
            None => {
                target.insert(key, aggregate);
            }
        }
    }
}

fn distinct_codes(map: &BTreeMap<AggregateKey, KeyAggregate>) -> usize {
    map.keys()
        .map(|k| k.code.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

// ==========================================
// ScanStats - 扫描计数
// ==========================================
// 仅用于日志与运行摘要，与聚合一样可合并
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_processed: u64,
    pub rows_read: u64,
    pub rows_accepted: u64,
    pub rows_malformed: u64,
    pub rejected_by_reason: BTreeMap<&'static str, u64>,
}

impl ScanStats {
    pub fn record_rejection(&mut self, reason_code: &'static str) {
        *self.rejected_by_reason.entry(reason_code).or_insert(0) += 1;
    }

    pub fn rows_rejected(&self) -> u64 {
        self.rejected_by_reason.values().sum()
    }

    pub fn merge(&mut self, other: &ScanStats) {
        self.files_processed += other.files_processed;
        self.rows_read += other.rows_read;
        self.rows_accepted += other.rows_accepted;
        self.rows_malformed += other.rows_malformed;
        for (reason, count) in &other.rejected_by_reason {
            *self.rejected_by_reason.entry(*reason).or_insert(0) += *count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(subclass: &str, occupation: &str, salary: f64, age: u32) -> NormalizedObservation {
        let age_bracket = AgeBracket::ALL
            .into_iter()
            .find(|b| b.contains(age))
            .unwrap();
        NormalizedObservation {
            subclass_key: subclass.to_string(),
            occupation_key: occupation.to_string(),
            monthly_salary: salary,
            age,
            age_bracket,
        }
    }

    #[test]
    fn test_salary_sum_fixed_point() {
        let mut sum = SalarySum::from_amount(0.1);
        sum.add(SalarySum::from_amount(0.2));
        assert_eq!(sum, SalarySum::from_amount(0.3));
        assert_eq!(SalarySum::default().average(0), None);
    }

    #[test]
    fn test_key_aggregate_record() {
        let mut agg = KeyAggregate::new();
        agg.record(SalarySum::from_amount(2000.0), 25, AgeBracket::From18To29);
        agg.record(SalarySum::from_amount(4000.0), 45, AgeBracket::From40To49);

        assert_eq!(agg.count(), 2);
        assert_eq!(agg.age_sum(), 70);
        assert_eq!(agg.average_salary(), Some(3000.0));
        assert_eq!(agg.average_age(), Some(35.0));
        assert_eq!(agg.bracket_average_salary(AgeBracket::From18To29), Some(2000.0));
        assert_eq!(agg.bracket_average_salary(AgeBracket::From30To39), None);
        assert!(agg.is_consistent());
    }

    #[test]
    fn test_aggregate_record_updates_both_dimensions() {
        let mut agg = Aggregate::new();
        agg.record("2023-01-01", &observation("4711302", "521110", 1500.0, 30));

        let key = AggregateKey::new("2023-01-01", "4711302");
        assert_eq!(agg.subclasses[&key].count(), 1);
        let key = AggregateKey::new("2023-01-01", "521110");
        assert_eq!(agg.occupations[&key].count(), 1);
    }

    #[test]
    fn test_merge_passes_through_disjoint_keys() {
        let mut a = Aggregate::new();
        a.record("2023-01-01", &observation("A", "X", 1500.0, 30));
        let mut b = Aggregate::new();
        b.record("2023-01-01", &observation("B", "X", 2500.0, 50));

        let merged = a.merged(b);
        assert_eq!(merged.subclasses.len(), 2);
        assert_eq!(merged.occupations.len(), 1);
        let x = &merged.occupations[&AggregateKey::new("2023-01-01", "X")];
        assert_eq!(x.count(), 2);
        assert_eq!(x.average_salary(), Some(2000.0));
        assert!(x.is_consistent());
    }

    #[test]
    fn test_distinct_codes_ignore_date() {
        let mut agg = Aggregate::new();
        agg.record("2023-01-01", &observation("A", "X", 1500.0, 30));
        agg.record("2023-02-01", &observation("A", "Y", 1500.0, 30));

        assert_eq!(agg.subclasses.len(), 2);
        assert_eq!(agg.distinct_subclasses(), 1);
        assert_eq!(agg.distinct_occupations(), 2);
    }

    #[test]
    fn test_scan_stats_merge() {
        let mut a = ScanStats::default();
        a.rows_read = 3;
        a.record_rejection("not_hiring");
        let mut b = ScanStats::default();
        b.rows_read = 2;
        b.record_rejection("not_hiring");
        b.record_rejection("invalid_age");

        a.merge(&b);
        assert_eq!(a.rows_read, 5);
        assert_eq!(a.rows_rejected(), 3);
        assert_eq!(a.rejected_by_reason["not_hiring"], 2);
    }
}
