// ==========================================
// 目录批量导入 - 插入载荷构造
// ==========================================
// 职责: 已校验原始行 → 类型化落库实体（补默认值 + 打归属标记）
// 默认值: 设备 condition=New / status=Available / quantity=1 / sales_option=Both
//         产品 is_featured=false
// 红线: owner_id 一律取调用方身份，忽略行内任何归属类字段
// ==========================================

use crate::config::CatalogConfig;
use crate::domain::catalog::{CatalogRecord, EquipmentRecord, ProductRecord, RawRow};
use crate::domain::types::EntityKind;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_coercion::{self, FieldIssue};
use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_EQUIPMENT_CONDITION: &str = "New";
pub const DEFAULT_EQUIPMENT_STATUS: &str = "Available";
pub const DEFAULT_EQUIPMENT_QUANTITY: i64 = 1;
pub const DEFAULT_SALES_OPTION: &str = "Both";
pub const DEFAULT_IS_FEATURED: bool = false;

/// 构造插入载荷
///
/// # 参数
/// - kind: 实体种类
/// - row: 已通过整批校验的原始行
/// - owner_id: 调用方制造商 ID
/// - row_no: 文件行号（仅用于错误定位）
/// - config: 枚举集合（设备分类归一为配置写法）
pub fn build_record(
    kind: EntityKind,
    row: &RawRow,
    owner_id: &str,
    row_no: usize,
    config: &CatalogConfig,
) -> ImportResult<CatalogRecord> {
    let convert = |field: &str, issue: FieldIssue| ImportError::TypeConversionError {
        row: row_no,
        field: field.to_string(),
        message: issue.message(field),
    };

    let name = row.text("name").ok_or_else(|| ImportError::SchemaViolation {
        row: row_no,
        field: "name".to_string(),
        message: FieldIssue::Missing.message("name"),
    })?;

    let record = match kind {
        EntityKind::Product => CatalogRecord::Product(ProductRecord {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name,
            description: row.text("description"),
            sku: row.text("sku"),
            price: field_coercion::required(field_coercion::non_negative_number(row, "price"))
                .map_err(|e| convert("price", e))?,
            stock_quantity: field_coercion::required(field_coercion::non_negative_integer(
                row,
                "stock_quantity",
            ))
            .map_err(|e| convert("stock_quantity", e))?,
            category: row.text("category"),
            weight: field_coercion::non_negative_number(row, "weight")
                .map_err(|e| convert("weight", e))?,
            dimensions: row.text("dimensions"),
            image_url: row.text("image_url"),
            is_featured: field_coercion::boolean(row, "is_featured")
                .map_err(|e| convert("is_featured", e))?
                .unwrap_or(DEFAULT_IS_FEATURED),
            created_at: Utc::now(),
        }),
        EntityKind::Equipment => CatalogRecord::Equipment(EquipmentRecord {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name,
            description: row.text("description"),
            model: row.text("model"),
            serial_number: row.text("serial_number"),
            manufacturer: row.text("manufacturer"),
            category: row.text("category").map(|c| {
                config
                    .match_equipment_category(&c)
                    .map(|canonical| canonical.to_string())
                    .unwrap_or(c)
            }),
            condition: row
                .text("condition")
                .unwrap_or_else(|| DEFAULT_EQUIPMENT_CONDITION.to_string()),
            status: row
                .text("status")
                .unwrap_or_else(|| DEFAULT_EQUIPMENT_STATUS.to_string()),
            price: field_coercion::non_negative_number(row, "price")
                .map_err(|e| convert("price", e))?,
            lease_rate: field_coercion::non_negative_number(row, "lease_rate")
                .map_err(|e| convert("lease_rate", e))?,
            quantity: field_coercion::non_negative_integer(row, "quantity")
                .map_err(|e| convert("quantity", e))?
                .unwrap_or(DEFAULT_EQUIPMENT_QUANTITY),
            sales_option: row
                .text("sales_option")
                .unwrap_or_else(|| DEFAULT_SALES_OPTION.to_string()),
            pay_per_use_price: field_coercion::non_negative_number(row, "pay_per_use_price")
                .map_err(|e| convert("pay_per_use_price", e))?,
            location: row.text("location"),
            image_url: row.text("image_url"),
            created_at: Utc::now(),
        }),
    };

    Ok(record)
}
