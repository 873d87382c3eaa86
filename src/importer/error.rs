// ==========================================
// CAGED 招聘薪资聚合 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 范围: 文件级失败（跳过整个文件）与调度级失败
// 说明: 行级拒绝见 record_normalizer::RejectReason，不经过此类型
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 输入相关错误 =====
    #[error("输入目录读取失败 ({path}): {message}")]
    InputDirError { path: String, message: String },

    #[error("文件名无效（至少 6 个字符才能推导参考日期）: {0}")]
    InvalidFileName(String),

    // ===== 文件相关错误 =====
    #[error("文件打开失败 ({path}): {message}")]
    FileOpenError { path: String, message: String },

    #[error("文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 结构错误 =====
    #[error("必需列缺失 ({path}): {}", .columns.join(", "))]
    MissingColumns { path: String, columns: Vec<String> },

    // ===== 调度错误 =====
    #[error("worker 数量无效: {0}（必须 >= 1）")]
    InvalidWorkerCount(usize),

    #[error("worker {worker} 异常退出: {message}")]
    WorkerPanicked { worker: usize, message: String },

    // ===== 输出错误 =====
    #[error("报表写入失败 ({path}): {message}")]
    ReportWriteError { path: String, message: String },

    #[error("错误日志写入失败: {0}")]
    ErrorLogWriteError(String),

    // ===== 通用错误 =====
    #[error("IO 错误: {0}")]
    IoError(String),
}

impl ImportError {
    /// 是否为文件级失败（文件被跳过，运行继续）
    pub fn is_file_level(&self) -> bool {
        matches!(
            self,
            ImportError::InvalidFileName(_)
                | ImportError::FileOpenError { .. }
                | ImportError::FileReadError { .. }
                | ImportError::MissingColumns { .. }
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::IoError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
