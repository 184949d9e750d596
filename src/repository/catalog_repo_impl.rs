// ==========================================
// 目录批量导入 - 目录 Repository 实现
// ==========================================
// 职责: 实现目录数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::catalog::{CatalogRecord, EquipmentRecord, ProductRecord};
use crate::domain::types::EntityKind;
use crate::repository::catalog_repo::{CatalogRepository, StoredRow};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// CatalogRepositoryImpl
// ==========================================
pub struct CatalogRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（与 ConfigManager 共享连接）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }

        Ok(Self { conn })
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn insert_product(conn: &Connection, product: &ProductRecord) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO products (
                id, owner_id, name, description, sku, price, stock_quantity,
                category, weight, dimensions, image_url, is_featured, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                product.id,
                product.owner_id,
                product.name,
                product.description,
                product.sku,
                product.price,
                product.stock_quantity,
                product.category,
                product.weight,
                product.dimensions,
                product.image_url,
                product.is_featured,
                product.created_at,
            ],
        )?;
        Ok(())
    }

    fn insert_equipment(conn: &Connection, equipment: &EquipmentRecord) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO equipment (
                id, owner_id, name, description, model, serial_number, manufacturer,
                category, condition, status, price, lease_rate, quantity, sales_option,
                pay_per_use_price, location, image_url, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18
            )
            "#,
            params![
                equipment.id,
                equipment.owner_id,
                equipment.name,
                equipment.description,
                equipment.model,
                equipment.serial_number,
                equipment.manufacturer,
                equipment.category,
                equipment.condition,
                equipment.status,
                equipment.price,
                equipment.lease_rate,
                equipment.quantity,
                equipment.sales_option,
                equipment.pay_per_use_price,
                equipment.location,
                equipment.image_url,
                equipment.created_at,
            ],
        )?;
        Ok(())
    }
}

/// 列值统一转文本（查重只关心文本形态）
fn value_ref_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(n) => Some(n.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    async fn insert(&self, kind: EntityKind, record: &CatalogRecord) -> RepositoryResult<String> {
        if record.kind() != kind {
            return Err(RepositoryError::ValidationError(format!(
                "record kind {} does not match target {}",
                record.kind(),
                kind
            )));
        }

        let conn = self.lock()?;
        match record {
            CatalogRecord::Product(product) => Self::insert_product(&conn, product)?,
            CatalogRecord::Equipment(equipment) => Self::insert_equipment(&conn, equipment)?,
        }

        Ok(record.id().to_string())
    }

    async fn query(
        &self,
        kind: EntityKind,
        owner_scope: &str,
        columns: &[&str],
    ) -> RepositoryResult<Vec<StoredRow>> {
        if columns.is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: String::new(),
                message: "at least one column is required".to_string(),
            });
        }

        // 列名拼入 SQL，必须先过白名单
        for column in columns {
            if !kind.is_schema_field(column) && *column != "id" {
                return Err(RepositoryError::FieldValueError {
                    field: column.to_string(),
                    message: format!("not a column of {}", kind.table_name()),
                });
            }
        }

        let quoted: Vec<String> = columns.iter().map(|c| format!("\"{}\"", c)).collect();
        let sql = format!(
            "SELECT {} FROM {} WHERE owner_id = ?1",
            quoted.join(", "),
            kind.table_name()
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![owner_scope], |row| {
            let mut stored: StoredRow = HashMap::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                stored.insert(column.to_string(), value_ref_to_text(row.get_ref(idx)?));
            }
            Ok(stored)
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    async fn count(&self, kind: EntityKind, owner_scope: &str) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let sql = format!("SELECT COUNT(*) FROM {} WHERE owner_id = ?1", kind.table_name());
        let count: i64 = conn.query_row(&sql, params![owner_scope], |row| row.get(0))?;
        Ok(count as usize)
    }
}
