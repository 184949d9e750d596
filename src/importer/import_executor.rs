// ==========================================
// 目录批量导入 - 逐行落库执行器
// ==========================================
// 职责: 按文件顺序逐行: 查重 → 构造载荷 → 插入 → 累计结果
// 约束: 严格串行，上一行插入完成后才处理下一行
//       已插入的行不回滚（非事务，单行原子）
// ==========================================

use crate::config::CatalogConfig;
use crate::domain::catalog::{row_number, RawRow, UploadResult};
use crate::domain::types::EntityKind;
use crate::importer::batch_validator::key_description;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::payload_builder::build_record;
use crate::repository::CatalogRepository;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ImportExecutor {
    repo: Arc<dyn CatalogRepository>,
    config: CatalogConfig,
}

impl ImportExecutor {
    pub fn new(repo: Arc<dyn CatalogRepository>, config: CatalogConfig) -> Self {
        Self { repo, config }
    }

    /// 逐行导入
    ///
    /// # 参数
    /// - kind: 实体种类
    /// - rows: 已通过整批校验的原始行（文件顺序）
    /// - owner_id: 调用方制造商 ID
    /// - existing_keys: 已有查重键；每成功一行即加入本行键
    ///
    /// # 返回
    /// - UploadResult: success_count + failed_count == rows.len()
    pub async fn execute(
        &self,
        kind: EntityKind,
        rows: &[RawRow],
        owner_id: &str,
        existing_keys: &mut HashSet<String>,
    ) -> UploadResult {
        let mut result = UploadResult::default();

        for (idx, row) in rows.iter().enumerate() {
            let row_no = row_number(idx);

            match self.import_row(kind, row, row_no, owner_id, existing_keys).await {
                Ok(record_id) => {
                    debug!(row = row_no, record_id = %record_id, "行导入成功");
                    result.record_success();
                }
                Err(e) => {
                    warn!(row = row_no, error = %e, "行导入失败");
                    result.record_failure(e.to_validation_error(row_no));
                }
            }
        }

        result
    }

    async fn import_row(
        &self,
        kind: EntityKind,
        row: &RawRow,
        row_no: usize,
        owner_id: &str,
        existing_keys: &mut HashSet<String>,
    ) -> ImportResult<String> {
        let key = row.dedup_key(kind);
        if existing_keys.contains(&key) {
            return Err(ImportError::Duplicate {
                row: row_no,
                message: format!(
                    "Duplicate entry: a {} with the same {} already exists",
                    kind,
                    key_description(kind)
                ),
            });
        }

        let record = build_record(kind, row, owner_id, row_no, &self.config)?;
        let record_id = self.repo.insert(kind, &record).await?;

        // 同批后续相同键的行在查重步骤被拦截
        existing_keys.insert(key);
        Ok(record_id)
    }
}
