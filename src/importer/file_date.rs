// ==========================================
// CAGED 招聘薪资聚合 - 参考日期推导
// ==========================================
// 职责: 文件名 → "YYYY-MM-01"
// 规则: 取文件名末尾 10 个字符（不足则取全部）
//       年 = 前 4 个字符，月 = 第 4 个字符起至倒数第 4 个字符
//       例: CAGEDMOV202301.txt → "202301.txt" → 2023-01-01
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use std::path::Path;

const MIN_NAME_LEN: usize = 6;
const TAIL_LEN: usize = 10;
const YEAR_LEN: usize = 4;
const EXTENSION_LEN: usize = 4;

/// 从文件名推导参考日期标签
pub fn derive_reporting_date(file_name: &str) -> ImportResult<String> {
    let chars: Vec<char> = file_name.chars().collect();
    if chars.len() < MIN_NAME_LEN {
        return Err(ImportError::InvalidFileName(file_name.to_string()));
    }

    let tail = &chars[chars.len().saturating_sub(TAIL_LEN)..];
    let year: String = tail.iter().take(YEAR_LEN).collect();
    let month_end = tail.len().saturating_sub(EXTENSION_LEN);
    let month: String = if month_end > YEAR_LEN {
        tail[YEAR_LEN..month_end].iter().collect()
    } else {
        String::new()
    };

    Ok(format!("{}-{}-01", year, month))
}

/// 从路径推导参考日期标签（使用文件名部分）
pub fn reporting_date_for(path: &Path) -> ImportResult<String> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    derive_reporting_date(&name)
}

/// 标签是否为合法日历日期（仅用于告警，不阻断）
pub fn is_calendar_date(label: &str) -> bool {
    NaiveDate::parse_from_str(label, "%Y-%m-%d").is_ok()
}
