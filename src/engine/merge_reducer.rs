// ==========================================
// CAGED 招聘薪资聚合 - 合并归约器
// ==========================================
// 职责: 将文件级 / 分片级聚合折叠为全局聚合
// 红线: 结果与折叠顺序无关（逐文件、逐分片、树形归约一致）
// ==========================================

use crate::domain::aggregate::{Aggregate, GlobalAggregate, ScanStats};

/// 线性折叠
pub fn reduce<I>(aggregates: I) -> GlobalAggregate
where
    I: IntoIterator<Item = Aggregate>,
{
    aggregates
        .into_iter()
        .fold(Aggregate::new(), |acc, next| acc.merged(next))
}

/// 两两树形归约
pub fn tree_reduce(mut level: Vec<Aggregate>) -> GlobalAggregate {
    if level.is_empty() {
        return Aggregate::new();
    }

    while level.len() > 1 {
        let mut next = Vec::with_capacity((level.len() + 1) / 2);
        let mut iter = level.into_iter();
        while let Some(left) = iter.next() {
            match iter.next() {
                Some(right) => next.push(left.merged(right)),
                None => next.push(left),
            }
        }
        level = next;
    }

    level.pop().unwrap_or_default()
}

/// 合并扫描计数
pub fn reduce_stats<'a, I>(stats: I) -> ScanStats
where
    I: IntoIterator<Item = &'a ScanStats>,
{
    stats.into_iter().fold(ScanStats::default(), |mut acc, next| {
        acc.merge(next);
        acc
    })
}
