// ==========================================
// 目录批量导入 - 导入层
// ==========================================
// 职责: 原始行 → 校验 → 查重 → 落库，产出 UploadResult
// 支持: 产品 / 设备；Excel, CSV
// ==========================================

// 模块声明
pub mod batch_validator;
pub mod catalog_importer_impl;
pub mod catalog_importer_trait;
pub mod duplicate_guard;
pub mod error;
pub mod field_coercion;
pub mod file_parser;
pub mod import_executor;
pub mod payload_builder;
pub mod row_validator;

// 重导出核心类型
pub use batch_validator::{detect_duplicates, BatchValidator as BatchValidatorImpl};
pub use catalog_importer_impl::CatalogImporterImpl;
pub use duplicate_guard::DuplicateGuard;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use import_executor::ImportExecutor;
pub use row_validator::RowValidator as RowValidatorImpl;

// 重导出 Trait 接口
pub use catalog_importer_trait::{BatchValidator, CatalogImporter, FileParser, RowValidator};
