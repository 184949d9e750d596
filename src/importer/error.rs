// ==========================================
// 目录批量导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 结构错误（整批阻断）/ 重复（跳过本行）/ 持久化（跳过本行）/ 认证（整批阻断）
// ==========================================

use crate::domain::catalog::ValidationError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误（解析协作方） =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .csv/.xlsx/.xls)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== 结构错误 =====
    #[error("{message}")]
    SchemaViolation {
        row: usize,
        field: String,
        message: String,
    },

    #[error("{field}: {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    // ===== 重复 =====
    #[error("{message}")]
    Duplicate { row: usize, message: String },

    // ===== 持久化 =====
    #[error("{0}")]
    Persistence(#[from] RepositoryError),

    #[error("failed to load existing records: {0}")]
    ExistingKeysUnavailable(String),

    // ===== 认证 =====
    #[error("not authenticated")]
    NotAuthenticated,
}

impl ImportError {
    /// 折叠为面向调用方的行级错误
    ///
    /// # 规则
    /// - 结构/类型错误: 行号 + 字段
    /// - 重复: 行号 + field="name"
    /// - 持久化及其他: 行号 + field=""
    /// - 认证: 行号固定 0
    pub fn to_validation_error(&self, row: usize) -> ValidationError {
        match self {
            ImportError::SchemaViolation { row, field, message } => {
                ValidationError::field_error(*row, field, message.clone())
            }
            ImportError::TypeConversionError { row, field, message } => {
                ValidationError::field_error(*row, field, message.clone())
            }
            ImportError::Duplicate { row, message } => {
                ValidationError::field_error(*row, "name", message.clone())
            }
            ImportError::NotAuthenticated => ValidationError::row_error(0, self.to_string()),
            other => ValidationError::row_error(row, other.to_string()),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
