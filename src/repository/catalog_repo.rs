// ==========================================
// 目录批量导入 - 目录 Repository Trait
// ==========================================
// 职责: 定义目录数据访问接口（不包含实现）
// 红线: Repository 不含业务规则，只做按归属范围的插入/查询
// ==========================================

use crate::domain::catalog::CatalogRecord;
use crate::domain::types::EntityKind;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// 查询结果行: 列名 → 文本值（NULL → None）
pub type StoredRow = HashMap<String, Option<String>>;

// ==========================================
// CatalogRepository Trait
// ==========================================
// 用途: 已落库目录记录的读写
// 实现者: CatalogRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// 插入一条记录（单行原子，无跨行事务）
    ///
    /// # 参数
    /// - kind: 实体种类（须与 record 一致）
    /// - record: 类型化插入载荷，已携带 owner_id
    ///
    /// # 返回
    /// - Ok(String): 新记录 ID
    /// - Err: 约束违反 / 数据库错误
    async fn insert(&self, kind: EntityKind, record: &CatalogRecord) -> RepositoryResult<String>;

    /// 按归属范围查询指定列
    ///
    /// # 参数
    /// - kind: 实体种类
    /// - owner_scope: 归属范围（制造商 ID）
    /// - columns: 需返回的列（必须是该实体的字段）
    async fn query(
        &self,
        kind: EntityKind,
        owner_scope: &str,
        columns: &[&str],
    ) -> RepositoryResult<Vec<StoredRow>>;

    /// 统计归属范围内的记录数
    async fn count(&self, kind: EntityKind, owner_scope: &str) -> RepositoryResult<usize>;
}
