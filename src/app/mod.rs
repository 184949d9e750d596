// ==========================================
// 目录批量导入 - 应用层
// ==========================================
// 职责: 装配 API 实例，解析默认数据库路径
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
