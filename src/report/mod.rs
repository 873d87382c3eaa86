// ==========================================
// CAGED 招聘薪资聚合 - 报表层
// ==========================================
// 职责: 全局聚合 → 子类 / 职业两张输出表
// ==========================================

pub mod builder;
pub mod writer;

pub use builder::{format_amount, Report, ReportBuilder, ReportKind, ReportRow};
pub use writer::ReportWriter;
