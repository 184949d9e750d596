// ==========================================
// 目录批量导入 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{ApiResult, CatalogImportApi};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "CATALOG_IMPORT_DB_PATH";

/// 应用状态
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 目录导入API
    pub catalog_import_api: Arc<CatalogImportApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(ApiError): 数据库无法打开或建表失败
    pub fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let catalog_import_api = Arc::new(CatalogImportApi::open(&db_path)?);

        Ok(Self {
            db_path,
            catalog_import_api,
        })
    }
}

/// 默认数据库路径
///
/// 顺序: 环境变量 → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./catalog_import.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("catalog-import");
        // 目录创建失败时回退当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("catalog_import.db");
        }
    }

    path.to_string_lossy().to_string()
}
