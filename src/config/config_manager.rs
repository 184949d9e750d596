// ==========================================
// 目录批量导入 - 配置管理器
// ==========================================
// 职责: 从 config_kv 表读取枚举集合覆写，缺省回退内置常量
// 存储: config_kv 表 (scope_id + key + value)
// ==========================================

use crate::config::catalog_config::CatalogConfig;
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 配置键
pub mod config_keys {
    pub const PRODUCT_CATEGORIES: &str = "catalog/product_categories";
    pub const EQUIPMENT_CATEGORIES: &str = "catalog/equipment_categories";
    pub const EQUIPMENT_CONDITIONS: &str = "catalog/equipment_conditions";
    pub const EQUIPMENT_STATUSES: &str = "catalog/equipment_statuses";
    pub const SALES_OPTIONS: &str = "catalog/sales_options";
}

/// 全局配置作用域
pub const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3",
            params![GLOBAL_SCOPE, key, value],
        )?;

        Ok(())
    }

    /// 加载枚举集合配置
    ///
    /// # 说明
    /// - 每个集合以 JSON 数组存储，如 `["Imaging","Dental"]`
    /// - 缺失、格式错误或空数组时使用内置默认值
    pub fn load_catalog_config(&self) -> Result<CatalogConfig, Box<dyn Error>> {
        let defaults = CatalogConfig::default();

        Ok(CatalogConfig {
            product_categories: self
                .read_list(config_keys::PRODUCT_CATEGORIES, defaults.product_categories)?,
            equipment_categories: self
                .read_list(config_keys::EQUIPMENT_CATEGORIES, defaults.equipment_categories)?,
            equipment_conditions: self
                .read_list(config_keys::EQUIPMENT_CONDITIONS, defaults.equipment_conditions)?,
            equipment_statuses: self
                .read_list(config_keys::EQUIPMENT_STATUSES, defaults.equipment_statuses)?,
            sales_options: self.read_list(config_keys::SALES_OPTIONS, defaults.sales_options)?,
        })
    }

    fn read_list(&self, key: &str, default: Vec<String>) -> Result<Vec<String>, Box<dyn Error>> {
        let raw = match self.get_global_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(values) if !values.is_empty() => Ok(values),
            Ok(_) => {
                tracing::warn!(config_key = key, "枚举集合配置为空，使用默认值");
                Ok(default)
            }
            Err(e) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    error = %e,
                    "枚举集合配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }
}
