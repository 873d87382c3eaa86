// ==========================================
// CAGED 招聘薪资聚合 - 报表写出
// ==========================================
// 职责: 报表行 → ';' 分隔文本表（含表头）
// 红线: 只由协调方在屏障之后调用，每张表写一次
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::report::builder::{Report, ReportKind, ReportRow};
use csv::{Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const OUTPUT_DELIMITER: u8 = b';';

pub struct ReportWriter;

impl ReportWriter {
    /// 写出一张表到任意 writer
    pub fn write_table<W: Write>(
        &self,
        kind: ReportKind,
        rows: &[ReportRow],
        writer: W,
    ) -> ImportResult<()> {
        let mut csv_writer = WriterBuilder::new()
            .delimiter(OUTPUT_DELIMITER)
            .terminator(Terminator::CRLF)
            .from_writer(writer);

        csv_writer.write_record(kind.header())?;
        for row in rows {
            csv_writer.write_record(row.to_cells())?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// 写出一张表到文件（覆盖）
    pub fn write_table_file(
        &self,
        kind: ReportKind,
        rows: &[ReportRow],
        path: &Path,
    ) -> ImportResult<()> {
        let to_error = |message: String| ImportError::ReportWriteError {
            path: path.display().to_string(),
            message,
        };

        let file = File::create(path).map_err(|e| to_error(e.to_string()))?;
        self.write_table(kind, rows, file)
            .map_err(|e| to_error(e.to_string()))?;

        info!(file = %path.display(), rows = rows.len(), table = kind.key_column(), "报表已写出");
        Ok(())
    }

    /// 写出两张报表
    ///
    /// # 参数
    /// - report: 报表行
    /// - subclass_path: 子类报表路径
    /// - occupation_path: 职业报表路径
    pub fn write_report(
        &self,
        report: &Report,
        subclass_path: &Path,
        occupation_path: &Path,
    ) -> ImportResult<()> {
        for (kind, path) in [
            (ReportKind::Subclass, subclass_path),
            (ReportKind::Occupation, occupation_path),
        ] {
            self.write_table_file(kind, report.rows(kind), path)?;
        }
        Ok(())
    }
}
