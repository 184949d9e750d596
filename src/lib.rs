// ==========================================
// 目录批量导入 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 制造商产品/设备目录的表格批量导入
// 流程: 解析 → 整批校验（硬闸门）→ 查重 → 逐行落库
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 校验/查重/落库
pub mod importer;

// 配置层 - 枚举集合
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 身份协作方
pub mod identity;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::EntityKind;

// 领域实体
pub use domain::{
    CatalogRecord, EquipmentRecord, ProductRecord, RawRow, UploadResult, ValidationError,
};

// 导入器
pub use importer::{CatalogImporter, CatalogImporterImpl, ImportError};

// 身份
pub use identity::{IdentityProvider, StaticIdentity};

// API
pub use api::{ApiError, CatalogImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "目录批量导入";
