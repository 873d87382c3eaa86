// ==========================================
// CAGED 招聘薪资聚合 - 领域类型定义
// ==========================================
// 职责: 年龄段 / 薪资单位等封闭枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 年龄段 (Age Bracket)
// ==========================================
// 红线: 五个区间闭合、连续、互不重叠
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "18-29")]
    From18To29,
    #[serde(rename = "30-39")]
    From30To39,
    #[serde(rename = "40-49")]
    From40To49,
    #[serde(rename = "50-59")]
    From50To59,
    #[serde(rename = "60+")]
    From60,
}

impl AgeBracket {
    /// 固定检查顺序（同时也是报表列顺序）
    pub const ALL: [AgeBracket; 5] = [
        AgeBracket::From18To29,
        AgeBracket::From30To39,
        AgeBracket::From40To49,
        AgeBracket::From50To59,
        AgeBracket::From60,
    ];

    /// 年龄上限哨兵值，代表 "60+" 无上限
    pub const MAX_AGE: u32 = 200;

    /// 闭区间 [min, max]
    pub const fn bounds(self) -> (u32, u32) {
        match self {
            AgeBracket::From18To29 => (18, 29),
            AgeBracket::From30To39 => (30, 39),
            AgeBracket::From40To49 => (40, 49),
            AgeBracket::From50To59 => (50, 59),
            AgeBracket::From60 => (60, Self::MAX_AGE),
        }
    }

    pub const fn contains(self, age: u32) -> bool {
        let (min, max) = self.bounds();
        age >= min && age <= max
    }

    /// 在 per-bracket 数组中的下标
    pub const fn index(self) -> usize {
        match self {
            AgeBracket::From18To29 => 0,
            AgeBracket::From30To39 => 1,
            AgeBracket::From40To49 => 2,
            AgeBracket::From50To59 => 3,
            AgeBracket::From60 => 4,
        }
    }

    /// 报表列名
    pub const fn label(self) -> &'static str {
        match self {
            AgeBracket::From18To29 => "18-29",
            AgeBracket::From30To39 => "30-39",
            AgeBracket::From40To49 => "40-49",
            AgeBracket::From50To59 => "50-59",
            AgeBracket::From60 => "60+",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// 薪资单位 (Pay Unit)
// ==========================================
// 源字段: unidadesaláriocódigo
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayUnit {
    Hourly, // 1 - 时薪
    Weekly, // 3 - 周薪
    Biweekly, // 4 - 双周薪
    Monthly, // 5 - 月薪
    Unsupported(String), // 6 / 7 / 99 - 明确不支持
    Unknown(String), // 其他代码
}

impl PayUnit {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => PayUnit::Hourly,
            "3" => PayUnit::Weekly,
            "4" => PayUnit::Biweekly,
            "5" => PayUnit::Monthly,
            "6" | "7" | "99" => PayUnit::Unsupported(code.to_string()),
            other => PayUnit::Unknown(other.to_string()),
        }
    }
}
