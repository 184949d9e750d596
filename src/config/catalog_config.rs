// ==========================================
// 目录批量导入 - 枚举值集合配置
// ==========================================
// 职责: 产品分类 / 设备分类 / 设备成色 / 设备状态 / 销售方式
// 匹配规则: 设备分类不区分大小写，其余全部精确匹配
// ==========================================

use serde::{Deserialize, Serialize};

pub const PRODUCT_CATEGORIES: &[&str] = &[
    "Medical Devices",
    "Diagnostic Equipment",
    "Surgical Instruments",
    "Patient Monitoring",
    "Laboratory Equipment",
    "Imaging Equipment",
    "Respiratory Care",
    "Rehabilitation Equipment",
    "Personal Protective Equipment",
    "Medical Supplies",
    "Other",
];

pub const EQUIPMENT_CATEGORIES: &[&str] = &[
    "Imaging",
    "Diagnostic",
    "Surgical",
    "Patient Monitoring",
    "Laboratory",
    "Respiratory",
    "Therapeutic",
    "Rehabilitation",
    "Dental",
    "Other",
];

pub const EQUIPMENT_CONDITIONS: &[&str] = &["New", "Refurbished", "Used - Like New", "Used - Good", "Used - Fair"];

pub const EQUIPMENT_STATUSES: &[&str] = &["Available", "Leased", "Sold", "Maintenance", "Reserved"];

pub const SALES_OPTIONS: &[&str] = &["Sale", "Lease", "Both", "Pay Per Use"];

// ==========================================
// CatalogConfig - 枚举值集合
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub product_categories: Vec<String>,
    pub equipment_categories: Vec<String>,
    pub equipment_conditions: Vec<String>,
    pub equipment_statuses: Vec<String>,
    pub sales_options: Vec<String>,
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            product_categories: to_owned_list(PRODUCT_CATEGORIES),
            equipment_categories: to_owned_list(EQUIPMENT_CATEGORIES),
            equipment_conditions: to_owned_list(EQUIPMENT_CONDITIONS),
            equipment_statuses: to_owned_list(EQUIPMENT_STATUSES),
            sales_options: to_owned_list(SALES_OPTIONS),
        }
    }
}

impl CatalogConfig {
    /// 产品分类（区分大小写）
    pub fn is_product_category(&self, value: &str) -> bool {
        self.product_categories.iter().any(|c| c == value)
    }

    /// 设备分类（不区分大小写），返回配置中的标准写法
    pub fn match_equipment_category(&self, value: &str) -> Option<&str> {
        let wanted = value.to_lowercase();
        self.equipment_categories
            .iter()
            .find(|c| c.to_lowercase() == wanted)
            .map(|c| c.as_str())
    }

    pub fn is_equipment_condition(&self, value: &str) -> bool {
        self.equipment_conditions.iter().any(|c| c == value)
    }

    pub fn is_equipment_status(&self, value: &str) -> bool {
        self.equipment_statuses.iter().any(|s| s == value)
    }

    pub fn is_sales_option(&self, value: &str) -> bool {
        self.sales_options.iter().any(|s| s == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_category_is_case_sensitive() {
        let config = CatalogConfig::default();
        assert!(config.is_product_category("Medical Devices"));
        assert!(!config.is_product_category("medical devices"));
    }

    #[test]
    fn test_equipment_category_is_case_insensitive() {
        let config = CatalogConfig::default();
        assert_eq!(config.match_equipment_category("imaging"), Some("Imaging"));
        assert_eq!(config.match_equipment_category("PATIENT MONITORING"), Some("Patient Monitoring"));
        assert_eq!(config.match_equipment_category("Spaceflight"), None);
    }

    #[test]
    fn test_defaults_contain_executor_defaults() {
        let config = CatalogConfig::default();
        assert!(config.is_equipment_condition("New"));
        assert!(config.is_equipment_status("Available"));
        assert!(config.is_sales_option("Both"));
    }
}
