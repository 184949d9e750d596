// ==========================================
// 目录批量导入 API
// ==========================================
// 职责: 封装目录导入相关功能（装配导入器、解析文件、计数）
// 说明: 每次调用重新加载枚举配置并按调用方身份装配导入器
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{CatalogConfig, ConfigManager};
use crate::db::{init_catalog_schema, open_sqlite_connection};
use crate::domain::catalog::{RawRow, UploadResult, ValidationError};
use crate::domain::types::EntityKind;
use crate::identity::IdentityProvider;
use crate::importer::{CatalogImporter, CatalogImporterImpl, UniversalFileParser};
use crate::repository::{CatalogRepository, CatalogRepositoryImpl};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// 目录导入 API
pub struct CatalogImportApi {
    repo: Arc<dyn CatalogRepository>,
    config_manager: Arc<ConfigManager>,
}

impl CatalogImportApi {
    /// 以已装配的仓储与配置管理器创建
    pub fn new(repo: Arc<dyn CatalogRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            repo,
            config_manager,
        }
    }

    /// 打开数据库（必要时建表），仓储与配置共享同一连接
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn open(db_path: &str) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(format!("{}: {}", db_path, e)))?;
        init_catalog_schema(&conn)?;
        let conn = Arc::new(Mutex::new(conn));

        let repo = CatalogRepositoryImpl::from_connection(conn.clone())?;
        let config_manager = ConfigManager::from_connection(conn)
            .map_err(|e| ApiError::InternalError(format!("config manager init failed: {}", e)))?;

        info!(db_path = %db_path, "目录导入 API 初始化完成");
        Ok(Self::new(Arc::new(repo), Arc::new(config_manager)))
    }

    /// 当前生效的枚举配置；读取失败时回退内置默认值
    pub fn catalog_config(&self) -> CatalogConfig {
        match self.config_manager.load_catalog_config() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "枚举配置读取失败，使用默认值");
                CatalogConfig::default()
            }
        }
    }

    fn importer(&self, identity: Arc<dyn IdentityProvider>) -> CatalogImporterImpl {
        CatalogImporterImpl::new(self.repo.clone(), identity, self.catalog_config())
    }

    /// 解析文件为原始行（CSV / Excel）
    pub fn parse_file(&self, file_path: &Path) -> ApiResult<Vec<RawRow>> {
        Ok(UniversalFileParser.parse(file_path)?)
    }

    pub fn validate_products(
        &self,
        identity: Arc<dyn IdentityProvider>,
        rows: &[RawRow],
    ) -> Vec<ValidationError> {
        self.importer(identity).validate_products(rows)
    }

    pub fn validate_equipment(
        &self,
        identity: Arc<dyn IdentityProvider>,
        rows: &[RawRow],
    ) -> Vec<ValidationError> {
        self.importer(identity).validate_equipment(rows)
    }

    pub async fn upload_products(
        &self,
        identity: Arc<dyn IdentityProvider>,
        rows: &[RawRow],
    ) -> UploadResult {
        self.importer(identity).upload_products(rows).await
    }

    pub async fn upload_equipment(
        &self,
        identity: Arc<dyn IdentityProvider>,
        rows: &[RawRow],
    ) -> UploadResult {
        self.importer(identity).upload_equipment(rows).await
    }

    /// 按种类校验（CLI 使用）
    pub fn validate(
        &self,
        identity: Arc<dyn IdentityProvider>,
        kind: EntityKind,
        rows: &[RawRow],
    ) -> Vec<ValidationError> {
        self.importer(identity).validate(kind, rows)
    }

    /// 解析文件并上传
    ///
    /// # 返回
    /// - Ok(UploadResult): 导入结果（含行级错误）
    /// - Err(ApiError): 文件无法解析
    pub async fn import_file(
        &self,
        identity: Arc<dyn IdentityProvider>,
        kind: EntityKind,
        file_path: &Path,
    ) -> ApiResult<UploadResult> {
        let rows = self.parse_file(file_path)?;
        info!(file = %file_path.display(), kind = %kind, rows = rows.len(), "文件解析完成，开始上传");
        Ok(self.importer(identity).upload(kind, &rows).await)
    }

    /// 归属范围内已落库记录数
    pub async fn count(&self, kind: EntityKind, owner_id: &str) -> ApiResult<usize> {
        Ok(self.repo.count(kind, owner_id).await?)
    }
}
