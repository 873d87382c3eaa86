// ==========================================
// CAGED 招聘薪资聚合 - 字段映射器
// ==========================================
// 职责: 表头 → 列下标布局；CSV 行 → RawRecord
// 红线: 必需列缺任何一个即为结构错误，整个文件跳过
// ==========================================

use crate::domain::observation::RawRecord;
use crate::importer::error::{ImportError, ImportResult};
use csv::StringRecord;

// ===== 必需列（源文件列名） =====
pub const COL_SUBCLASS: &str = "subclasse";
pub const COL_OCCUPATION: &str = "cbo2002ocupação";
pub const COL_SALARY: &str = "salário";
pub const COL_AGE: &str = "idade";
pub const COL_MOVEMENT: &str = "saldomovimentação";
pub const COL_PAY_UNIT: &str = "unidadesaláriocódigo";
pub const COL_HOURS: &str = "horascontratuais";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_SUBCLASS,
    COL_OCCUPATION,
    COL_SALARY,
    COL_AGE,
    COL_MOVEMENT,
    COL_PAY_UNIT,
    COL_HOURS,
];

const UTF8_BOM: char = '\u{feff}';

// ==========================================
// ColumnLayout - 必需列的下标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    subclass: usize,
    occupation: usize,
    salary: usize,
    age: usize,
    movement: usize,
    pay_unit: usize,
    hours: usize,
}

impl ColumnLayout {
    /// 根据表头定位必需列
    ///
    /// # 返回
    /// - Ok(ColumnLayout): 全部必需列存在
    /// - Err(MissingColumns): 列出所有缺失列
    pub fn from_headers(headers: &StringRecord, path: &str) -> ImportResult<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |column: &str| names.iter().position(|n| n == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(**c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                path: path.to_string(),
                columns: missing,
            });
        }

        let index = |column: &str| find(column).unwrap_or_default();
        Ok(Self {
            subclass: index(COL_SUBCLASS),
            occupation: index(COL_OCCUPATION),
            salary: index(COL_SALARY),
            age: index(COL_AGE),
            movement: index(COL_MOVEMENT),
            pay_unit: index(COL_PAY_UNIT),
            hours: index(COL_HOURS),
        })
    }

    /// 将 CSV 行映射为 RawRecord（短行的缺失字段为空字符串）
    pub fn map_record(&self, record: &StringRecord, line_number: u64) -> RawRecord {
        let get = |idx: usize| record.get(idx).unwrap_or("").to_string();
        RawRecord {
            subclass: get(self.subclass),
            occupation: get(self.occupation),
            movement_flag: get(self.movement),
            salary: get(self.salary),
            pay_unit_code: get(self.pay_unit),
            contracted_hours: get(self.hours),
            age: get(self.age),
            line_number,
        }
    }
}

/// 表头清洗: TRIM + 去除 UTF-8 BOM
fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches(UTF8_BOM).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cols: &[&str]) -> StringRecord {
        StringRecord::from(cols.to_vec())
    }

    #[test]
    fn test_layout_any_column_order() {
        let hdr = headers(&[
            "competênciamov",
            "idade",
            "subclasse",
            "horascontratuais",
            "saldomovimentação",
            "salário",
            "cbo2002ocupação",
            "unidadesaláriocódigo",
        ]);
        let layout = ColumnLayout::from_headers(&hdr, "f.txt").unwrap();

        let row = StringRecord::from(vec!["202301", "25", "4711302", "44", "1", "2000,00", "521110", "5"]);
        let rec = layout.map_record(&row, 2);
        assert_eq!(rec.subclass, "4711302");
        assert_eq!(rec.occupation, "521110");
        assert_eq!(rec.age, "25");
        assert_eq!(rec.salary, "2000,00");
        assert_eq!(rec.contracted_hours, "44");
        assert_eq!(rec.movement_flag, "1");
        assert_eq!(rec.pay_unit_code, "5");
        assert_eq!(rec.line_number, 2);
    }

    #[test]
    fn test_layout_reports_all_missing_columns() {
        let hdr = headers(&["subclasse", "cbo2002ocupação", "salário"]);
        let err = ColumnLayout::from_headers(&hdr, "f.txt").unwrap_err();
        match err {
            ImportError::MissingColumns { path, columns } => {
                assert_eq!(path, "f.txt");
                assert_eq!(
                    columns,
                    vec!["idade", "saldomovimentação", "unidadesaláriocódigo", "horascontratuais"]
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_layout_strips_bom_and_whitespace() {
        let hdr = headers(&[
            "\u{feff}subclasse",
            " cbo2002ocupação ",
            "salário",
            "idade",
            "saldomovimentação",
            "unidadesaláriocódigo",
            "horascontratuais",
        ]);
        assert!(ColumnLayout::from_headers(&hdr, "f.txt").is_ok());
    }

    #[test]
    fn test_map_short_row_yields_empty_fields() {
        let hdr = headers(&REQUIRED_COLUMNS);
        let layout = ColumnLayout::from_headers(&hdr, "f.txt").unwrap();
        let row = StringRecord::from(vec!["4711302", "521110"]);
        let rec = layout.map_record(&row, 3);
        assert_eq!(rec.subclass, "4711302");
        assert_eq!(rec.salary, "");
        assert_eq!(rec.contracted_hours, "");
    }
}
