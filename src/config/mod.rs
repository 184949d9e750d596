// ==========================================
// 目录批量导入 - 配置层
// ==========================================
// 职责: 枚举值集合（内置默认 + config_kv 覆写）
// 存储: config_kv 表
// ==========================================

pub mod catalog_config;
pub mod config_manager;

// 重导出
pub use catalog_config::{
    CatalogConfig, EQUIPMENT_CATEGORIES, EQUIPMENT_CONDITIONS, EQUIPMENT_STATUSES,
    PRODUCT_CATEGORIES, SALES_OPTIONS,
};
pub use config_manager::{config_keys, ConfigManager};
