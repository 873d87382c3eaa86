// ==========================================
// CAGED 招聘薪资聚合 - 年龄段映射
// ==========================================
// 职责: 整数年龄 → AgeBracket | None
// 规则: 18–29 / 30–39 / 40–49 / 50–59 / 60–200，按固定顺序检查
// ==========================================

use crate::domain::types::AgeBracket;

#[derive(Debug, Clone, Copy, Default)]
pub struct AgeBracketer;

impl AgeBracketer {
    /// 映射年龄到年龄段
    ///
    /// # 返回
    /// - Some(AgeBracket): 年龄落在某个闭区间内
    /// - None: 年龄 < 18 或 > 200
    pub fn bracket(&self, age: u32) -> Option<AgeBracket> {
        AgeBracket::ALL
            .iter()
            .copied()
            .find(|bracket| bracket.contains(age))
    }
}
