// ==========================================
// 目录批量导入 - 数据仓储层
// ==========================================
// 职责: 已落库目录记录的插入与按归属范围查询
// 存储: SQLite（rusqlite）
// ==========================================

pub mod catalog_repo;
pub mod catalog_repo_impl;
pub mod error;

// 重导出
pub use catalog_repo::{CatalogRepository, StoredRow};
pub use catalog_repo_impl::CatalogRepositoryImpl;
pub use error::{RepositoryError, RepositoryResult};
