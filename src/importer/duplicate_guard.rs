// ==========================================
// 目录批量导入 - 已有记录查重键加载
// ==========================================
// 职责: 一次按归属范围查询最少的键字段列，生成已有查重键集合
// 约束: 每次调用重新查询，不做跨调用缓存
// ==========================================

use crate::domain::catalog::dedup_key;
use crate::domain::types::EntityKind;
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::CatalogRepository;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct DuplicateGuard {
    repo: Arc<dyn CatalogRepository>,
}

impl DuplicateGuard {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    /// 加载归属范围内已有记录的查重键
    ///
    /// # 参数
    /// - kind: 实体种类
    /// - owner_scope: 制造商 ID
    ///
    /// # 返回
    /// - Ok(HashSet<String>): 已有查重键
    /// - Err(ExistingKeysUnavailable): 查询失败
    #[instrument(skip(self))]
    pub async fn load_existing_keys(
        &self,
        kind: EntityKind,
        owner_scope: &str,
    ) -> ImportResult<HashSet<String>> {
        let rows = self
            .repo
            .query(kind, owner_scope, kind.key_fields())
            .await
            .map_err(|e| ImportError::ExistingKeysUnavailable(e.to_string()))?;

        let keys: HashSet<String> = rows
            .iter()
            .map(|row| dedup_key(kind, |field| row.get(field).cloned().flatten()))
            .collect();

        debug!(records = rows.len(), keys = keys.len(), "已有查重键加载完成");
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CatalogRecord, RawRow};
    use crate::repository::{RepositoryError, RepositoryResult, StoredRow};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// 只回放固定查询结果的仓储
    struct FixedRepo {
        rows: Vec<StoredRow>,
        fail: bool,
    }

    #[async_trait]
    impl CatalogRepository for FixedRepo {
        async fn insert(&self, _kind: EntityKind, record: &CatalogRecord) -> RepositoryResult<String> {
            Ok(record.id().to_string())
        }

        async fn query(
            &self,
            _kind: EntityKind,
            _owner_scope: &str,
            _columns: &[&str],
        ) -> RepositoryResult<Vec<StoredRow>> {
            if self.fail {
                return Err(RepositoryError::DatabaseQueryError("disk I/O error".to_string()));
            }
            Ok(self.rows.clone())
        }

        async fn count(&self, _kind: EntityKind, _owner_scope: &str) -> RepositoryResult<usize> {
            Ok(self.rows.len())
        }
    }

    fn stored(pairs: &[(&str, Option<&str>)]) -> StoredRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(|s| s.to_string())))
            .collect::<HashMap<_, _>>()
    }

    #[tokio::test]
    async fn test_keys_match_row_key_function() {
        let repo = FixedRepo {
            rows: vec![
                stored(&[("name", Some("Infusion Pump")), ("sku", Some("IP-1"))]),
                stored(&[("name", Some("Mask")), ("sku", None)]),
            ],
            fail: false,
        };
        let guard = DuplicateGuard::new(Arc::new(repo));

        let keys = guard.load_existing_keys(EntityKind::Product, "mfr-1").await.unwrap();

        let incoming = RawRow::from_pairs([("name", "infusion pump "), ("sku", "ip-1")]);
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&incoming.dedup_key(EntityKind::Product)));
        assert!(keys.contains("mask|"));
    }

    #[tokio::test]
    async fn test_query_failure_is_reported() {
        let guard = DuplicateGuard::new(Arc::new(FixedRepo { rows: vec![], fail: true }));

        let err = guard
            .load_existing_keys(EntityKind::Equipment, "mfr-1")
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::ExistingKeysUnavailable(_)));
        assert!(err.to_string().contains("disk I/O error"));
    }
}
