// ==========================================
// 目录批量导入 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑，不含导入流程逻辑
// ==========================================

pub mod catalog;
pub mod types;

// 重导出核心类型
pub use catalog::{
    dedup_key, row_number, CatalogRecord, EquipmentRecord, ProductRecord, RawRow, UploadResult,
    ValidationError, HEADER_ROW_OFFSET,
};
pub use types::{EntityKind, EQUIPMENT_FIELDS, PRODUCT_FIELDS};
