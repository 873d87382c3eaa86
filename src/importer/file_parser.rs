// ==========================================
// CAGED 招聘薪资聚合 - CSV 记录读取器
// ==========================================
// 职责: 打开 ';' 分隔文件，校验表头，逐行流式产出 RawRecord
// 红线: 不一次性加载整个文件（单文件可达数百万行）
// ==========================================

use crate::domain::observation::RawRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::ColumnLayout;
use csv::{ErrorKind, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const DELIMITER: u8 = b';';

/// 单行读取结果
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    /// 结构正常的行（业务规则尚未校验）
    Record(RawRecord),
    /// CSV 层无法解码的行（如非法 UTF-8），行级跳过
    Malformed { line: u64, message: String },
}

// ==========================================
// CsvRecordReader
// ==========================================
pub struct CsvRecordReader {
    reader: csv::Reader<BufReader<File>>,
    layout: ColumnLayout,
    path: String,
    buffer: StringRecord,
}

impl CsvRecordReader {
    /// 打开文件并校验表头
    ///
    /// # 返回
    /// - Ok(CsvRecordReader): 必需列齐全
    /// - Err(FileOpenError): 文件无法打开
    /// - Err(MissingColumns): 必需列缺失
    /// - Err(FileReadError): 表头读取失败
    pub fn open(path: &Path) -> ImportResult<Self> {
        let path_str = path.display().to_string();

        let file = File::open(path).map_err(|e| ImportError::FileOpenError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| ImportError::FileReadError {
                path: path_str.clone(),
                message: e.to_string(),
            })?
            .clone();
        let layout = ColumnLayout::from_headers(&headers, &path_str)?;

        Ok(Self {
            reader,
            layout,
            path: path_str,
            buffer: StringRecord::new(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Iterator for CsvRecordReader {
    type Item = ImportResult<ParsedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.buffer) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.buffer.position().map(|p| p.line()).unwrap_or(0);
                Some(Ok(ParsedRow::Record(self.layout.map_record(&self.buffer, line))))
            }
            Err(e) => {
                if let ErrorKind::Io(_) = e.kind() {
                    // IO 错误: 整个文件失败
                    return Some(Err(ImportError::FileReadError {
                        path: self.path.clone(),
                        message: e.to_string(),
                    }));
                }
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or_else(|| self.reader.position().line());
                Some(Ok(ParsedRow::Malformed {
                    line,
                    message: e.to_string(),
                }))
            }
        }
    }
}
