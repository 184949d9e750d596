// ==========================================
// 目录批量导入 - 开发库初始化
// ==========================================
// 用法: seed_catalog_db [db_path] [--reset]
// 职责: 建表，并把内置枚举集合写入 config_kv 便于手工调整
// ==========================================

use chrono::Local;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use catalog_import::app::get_default_db_path;
use catalog_import::config::{config_keys, CatalogConfig, ConfigManager};
use catalog_import::db::{init_catalog_schema, open_sqlite_connection, read_schema_version};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let reset = args.iter().any(|a| a == "--reset");
    let db_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(get_default_db_path);

    if reset {
        backup_and_reset_db(&db_path)?;
    }

    let conn = open_sqlite_connection(&db_path)?;
    init_catalog_schema(&conn)?;
    let version = read_schema_version(&conn)?;

    let conn = Arc::new(Mutex::new(conn));
    let config_manager = ConfigManager::from_connection(conn.clone())?;
    seed_enumerations(&config_manager)?;

    eprintln!("Seeded {} (schema_version={:?})", db_path, version);
    print_quick_counts(conn)?;
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

/// 只写入尚不存在的键，已有的人工调整保持不变
fn seed_enumerations(config_manager: &ConfigManager) -> Result<(), Box<dyn Error>> {
    let defaults = CatalogConfig::default();
    let entries: [(&str, &Vec<String>); 5] = [
        (config_keys::PRODUCT_CATEGORIES, &defaults.product_categories),
        (config_keys::EQUIPMENT_CATEGORIES, &defaults.equipment_categories),
        (config_keys::EQUIPMENT_CONDITIONS, &defaults.equipment_conditions),
        (config_keys::EQUIPMENT_STATUSES, &defaults.equipment_statuses),
        (config_keys::SALES_OPTIONS, &defaults.sales_options),
    ];

    for (key, values) in entries {
        if config_manager.get_global_config_value(key)?.is_some() {
            eprintln!("  keep {}", key);
            continue;
        }
        config_manager.set_global_config_value(key, &serde_json::to_string(values)?)?;
        eprintln!("  seed {} ({} values)", key, values.len());
    }

    Ok(())
}

fn print_quick_counts(conn: Arc<Mutex<rusqlite::Connection>>) -> Result<(), Box<dyn Error>> {
    let conn = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
    let tables = ["products", "equipment", "config_kv"];

    eprintln!("Row counts:");
    for t in tables {
        let sql = format!("SELECT COUNT(*) FROM {}", t);
        let n: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        eprintln!("  {:<12} {}", t, n);
    }
    Ok(())
}
