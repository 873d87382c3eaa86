// ==========================================
// CAGED 招聘薪资聚合 - 分片器
// ==========================================
// 职责: 将有序文件列表切分为 W 个连续、近似等长的分片
// 规则: 前 N mod W 个 worker 分得 ceil(N/W)，其余分得 floor(N/W)
// 红线: 确定性 - 相同输入与 W 必然得到相同分配
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::path::PathBuf;

/// 单个 worker 负责的连续文件切片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    pub worker: usize,
    pub files: Vec<PathBuf>,
}

impl Shard {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// 切分文件列表
///
/// # 参数
/// - files: 全部文件（已排序）
/// - workers: worker 数量 W（必须 >= 1）
///
/// # 返回
/// - Ok(Vec<Shard>): 恰好 W 个分片（N < W 时尾部分片为空）
/// - Err: W == 0
pub fn partition(files: &[PathBuf], workers: usize) -> ImportResult<Vec<Shard>> {
    if workers == 0 {
        return Err(ImportError::InvalidWorkerCount(workers));
    }

    let base = files.len() / workers;
    let remainder = files.len() % workers;

    let mut shards = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let size = if worker < remainder { base + 1 } else { base };
        let end = start + size;
        shards.push(Shard {
            worker,
            files: files[start..end].to_vec(),
        });
        start = end;
    }

    Ok(shards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(n: usize) -> Vec<PathBuf> {
        (0..n)
            .map(|i| PathBuf::from(format!("CAGEDMOV2023{:02}.txt", i)))
            .collect()
    }

    #[test]
    fn test_partition_rejects_zero_workers() {
        let result = partition(&files(3), 0);
        assert!(matches!(result, Err(ImportError::InvalidWorkerCount(0))));
    }

    #[test]
    fn test_partition_sizes_and_order() {
        for n in 0..25 {
            for w in 1..9 {
                let input = files(n);
                let shards = partition(&input, w).unwrap();

                assert_eq!(shards.len(), w);
                let floor = n / w;
                let ceil = (n + w - 1) / w;
                let total: usize = shards.iter().map(|s| s.len()).sum();
                assert_eq!(total, n);
                for (i, shard) in shards.iter().enumerate() {
                    assert_eq!(shard.worker, i);
                    assert!(shard.len() == floor || shard.len() == ceil);
                    // 前 N mod W 个分片取上整
                    if i < n % w {
                        assert_eq!(shard.len(), ceil);
                    } else {
                        assert_eq!(shard.len(), floor);
                    }
                }

                let concatenated: Vec<PathBuf> =
                    shards.into_iter().flat_map(|s| s.files).collect();
                assert_eq!(concatenated, input);
            }
        }
    }

    #[test]
    fn test_partition_deterministic() {
        let input = files(11);
        assert_eq!(partition(&input, 4).unwrap(), partition(&input, 4).unwrap());
    }

    #[test]
    fn test_partition_fewer_files_than_workers() {
        let shards = partition(&files(2), 4).unwrap();
        let sizes: Vec<usize> = shards.iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![1, 1, 0, 0]);
    }
}
