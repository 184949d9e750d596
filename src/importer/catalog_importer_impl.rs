// ==========================================
// 目录批量导入 - 导入器实现
// ==========================================
// 职责: 编排整条导入管道，并把所有故障折叠进 UploadResult
// 流程: 身份 → 整批校验（硬闸门）→ 加载已有查重键 → 逐行落库
// 红线: 闸门未通过时不发生任何写入
// ==========================================

use crate::config::CatalogConfig;
use crate::domain::catalog::{RawRow, UploadResult, ValidationError};
use crate::domain::types::EntityKind;
use crate::identity::IdentityProvider;
use crate::importer::batch_validator::BatchValidator as BatchValidatorImpl;
use crate::importer::catalog_importer_trait::{BatchValidator, CatalogImporter};
use crate::importer::duplicate_guard::DuplicateGuard;
use crate::importer::error::ImportError;
use crate::importer::import_executor::ImportExecutor;
use crate::importer::row_validator::RowValidator as RowValidatorImpl;
use crate::repository::CatalogRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

// ==========================================
// CatalogImporterImpl - 目录导入器实现
// ==========================================
pub struct CatalogImporterImpl {
    // 调用方身份
    identity: Arc<dyn IdentityProvider>,

    // 导入组件
    batch_validator: Box<dyn BatchValidator>,
    duplicate_guard: DuplicateGuard,
    executor: ImportExecutor,
}

impl CatalogImporterImpl {
    /// 按默认组件装配
    ///
    /// # 参数
    /// - repo: 目录仓储
    /// - identity: 身份提供方
    /// - config: 枚举集合
    pub fn new(
        repo: Arc<dyn CatalogRepository>,
        identity: Arc<dyn IdentityProvider>,
        config: CatalogConfig,
    ) -> Self {
        let batch_validator = Box::new(BatchValidatorImpl::new(Box::new(RowValidatorImpl::new(
            config.clone(),
        ))));

        Self::with_components(
            identity,
            batch_validator,
            DuplicateGuard::new(repo.clone()),
            ImportExecutor::new(repo, config),
        )
    }

    /// 以显式组件装配（测试中替换校验器或仓储）
    pub fn with_components(
        identity: Arc<dyn IdentityProvider>,
        batch_validator: Box<dyn BatchValidator>,
        duplicate_guard: DuplicateGuard,
        executor: ImportExecutor,
    ) -> Self {
        Self {
            identity,
            batch_validator,
            duplicate_guard,
            executor,
        }
    }

    /// 只校验，不落库
    pub fn validate(&self, kind: EntityKind, rows: &[RawRow]) -> Vec<ValidationError> {
        self.batch_validator.validate_batch(kind, rows)
    }

    /// 上传一批行
    ///
    /// # 返回
    /// - UploadResult: 永不返回错误；success_count + failed_count == rows.len()
    #[instrument(skip(self, rows), fields(row_count = rows.len()))]
    pub async fn upload(&self, kind: EntityKind, rows: &[RawRow]) -> UploadResult {
        let total = rows.len();

        // 1. 身份
        let owner_id = match self.identity.current_owner_id() {
            Some(owner_id) => owner_id,
            None => {
                warn!("未认证的上传请求，整批拒绝");
                return UploadResult::rejected(
                    total,
                    vec![ImportError::NotAuthenticated.to_validation_error(0)],
                );
            }
        };

        info!(owner_id = %owner_id, "开始目录批量导入");

        // 2. 整批校验（硬闸门）
        let errors = self.batch_validator.validate_batch(kind, rows);
        if !errors.is_empty() {
            info!(
                owner_id = %owner_id,
                error_count = errors.len(),
                "整批校验未通过，未写入任何记录"
            );
            return UploadResult::rejected(total, errors);
        }

        // 3. 已有查重键
        let mut existing_keys = match self.duplicate_guard.load_existing_keys(kind, &owner_id).await
        {
            Ok(keys) => keys,
            Err(e) => {
                error!(owner_id = %owner_id, error = %e, "加载已有记录失败，整批放弃");
                return UploadResult::rejected(total, vec![e.to_validation_error(0)]);
            }
        };

        // 4. 逐行落库
        let result = self
            .executor
            .execute(kind, rows, &owner_id, &mut existing_keys)
            .await;

        info!(
            owner_id = %owner_id,
            success = result.success_count,
            failed = result.failed_count,
            "目录批量导入完成"
        );
        result
    }
}

#[async_trait]
impl CatalogImporter for CatalogImporterImpl {
    fn validate_products(&self, rows: &[RawRow]) -> Vec<ValidationError> {
        self.validate(EntityKind::Product, rows)
    }

    fn validate_equipment(&self, rows: &[RawRow]) -> Vec<ValidationError> {
        self.validate(EntityKind::Equipment, rows)
    }

    async fn upload_products(&self, rows: &[RawRow]) -> UploadResult {
        self.upload(EntityKind::Product, rows).await
    }

    async fn upload_equipment(&self, rows: &[RawRow]) -> UploadResult {
        self.upload(EntityKind::Equipment, rows).await
    }
}
