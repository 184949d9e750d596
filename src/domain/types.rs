// ==========================================
// 目录批量导入 - 领域类型定义
// ==========================================
// 职责: 实体种类（产品/设备）及其字段清单
// 红线: 一个批次只能包含同一种实体
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 实体种类 (Entity Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Product,   // 产品清单
    Equipment, // 设备清单
}

/// 产品字段全集（与 products 表列一致，不含 id/owner_id/created_at）
pub const PRODUCT_FIELDS: &[&str] = &[
    "name",
    "description",
    "sku",
    "price",
    "stock_quantity",
    "category",
    "weight",
    "dimensions",
    "image_url",
    "is_featured",
];

/// 设备字段全集（与 equipment 表列一致，不含 id/owner_id/created_at）
pub const EQUIPMENT_FIELDS: &[&str] = &[
    "name",
    "description",
    "model",
    "serial_number",
    "manufacturer",
    "category",
    "condition",
    "status",
    "price",
    "lease_rate",
    "quantity",
    "sales_option",
    "pay_per_use_price",
    "location",
    "image_url",
];

impl EntityKind {
    /// 查重键字段（顺序固定，决定 Dedup Key 的拼接顺序）
    pub fn key_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Product => &["name", "sku"],
            EntityKind::Equipment => &["name", "model", "serial_number"],
        }
    }

    /// 该实体的全部业务字段
    pub fn schema_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Product => PRODUCT_FIELDS,
            EntityKind::Equipment => EQUIPMENT_FIELDS,
        }
    }

    pub fn is_schema_field(&self, field: &str) -> bool {
        self.schema_fields().contains(&field)
    }

    /// 落库表名
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Product => "products",
            EntityKind::Equipment => "equipment",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Equipment => "equipment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" | "products" => Ok(EntityKind::Product),
            "equipment" | "equipments" => Ok(EntityKind::Equipment),
            other => Err(format!("未知实体种类: {}（应为 products/equipment）", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_plural() {
        assert_eq!("products".parse::<EntityKind>(), Ok(EntityKind::Product));
        assert_eq!(" Equipment ".parse::<EntityKind>(), Ok(EntityKind::Equipment));
        assert!("vehicles".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_key_fields_are_schema_fields() {
        for kind in [EntityKind::Product, EntityKind::Equipment] {
            for field in kind.key_fields() {
                assert!(kind.is_schema_field(field), "{} 缺少字段 {}", kind, field);
            }
        }
    }
}
