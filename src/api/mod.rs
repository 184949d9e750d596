// ==========================================
// 目录批量导入 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 CLI 及上层调用
// ==========================================

pub mod catalog_import_api;
pub mod error;

// 重导出核心类型
pub use catalog_import_api::CatalogImportApi;
pub use error::{ApiError, ApiResult};
