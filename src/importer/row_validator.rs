// ==========================================
// 目录批量导入 - 单行校验器实现
// ==========================================
// 职责: 按实体种类对单行应用字段规则
// 特性: 纯函数，无 I/O；同一行可产生多条错误
// ==========================================

use crate::config::CatalogConfig;
use crate::domain::catalog::{row_number, RawRow, ValidationError};
use crate::domain::types::EntityKind;
use crate::importer::catalog_importer_trait::RowValidator as RowValidatorTrait;
use crate::importer::field_coercion::{self, FieldIssue};

pub struct RowValidator {
    config: CatalogConfig,
}

impl RowValidator {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// 产品规则
    fn validate_product(&self, row: &RawRow, row_no: usize, errors: &mut Vec<ValidationError>) {
        check_name(row, row_no, errors);
        check(
            field_coercion::required(field_coercion::non_negative_number(row, "price")),
            "price",
            row_no,
            errors,
        );
        check(
            field_coercion::required(field_coercion::non_negative_integer(row, "stock_quantity")),
            "stock_quantity",
            row_no,
            errors,
        );

        // 产品分类: 精确匹配（原样比较，不 TRIM）
        if let Some(category) = row.raw_text("category") {
            if !self.config.is_product_category(&category) {
                errors.push(ValidationError::field_error(
                    row_no,
                    "category",
                    enum_message("category", &category, &self.config.product_categories),
                ));
            }
        }

        check(field_coercion::non_negative_number(row, "weight"), "weight", row_no, errors);
        check(field_coercion::boolean(row, "is_featured"), "is_featured", row_no, errors);
    }

    /// 设备规则
    fn validate_equipment(&self, row: &RawRow, row_no: usize, errors: &mut Vec<ValidationError>) {
        check_name(row, row_no, errors);
        check(field_coercion::non_negative_number(row, "price"), "price", row_no, errors);
        check(field_coercion::non_negative_number(row, "lease_rate"), "lease_rate", row_no, errors);
        check(field_coercion::non_negative_integer(row, "quantity"), "quantity", row_no, errors);

        // 设备分类: 不区分大小写
        if let Some(category) = row.text("category") {
            if self.config.match_equipment_category(&category).is_none() {
                errors.push(ValidationError::field_error(
                    row_no,
                    "category",
                    enum_message("category", &category, &self.config.equipment_categories),
                ));
            }
        }

        // 其余枚举: 精确匹配（原样比较，不 TRIM）
        let config = &self.config;
        let exact_sets: [(&str, fn(&CatalogConfig, &str) -> bool, &[String]); 3] = [
            ("condition", CatalogConfig::is_equipment_condition, &config.equipment_conditions),
            ("status", CatalogConfig::is_equipment_status, &config.equipment_statuses),
            ("sales_option", CatalogConfig::is_sales_option, &config.sales_options),
        ];
        for (field, is_allowed, allowed) in exact_sets {
            if let Some(value) = row.raw_text(field) {
                if !is_allowed(config, &value) {
                    errors.push(ValidationError::field_error(
                        row_no,
                        field,
                        enum_message(field, &value, allowed),
                    ));
                }
            }
        }

        check(
            field_coercion::non_negative_number(row, "pay_per_use_price"),
            "pay_per_use_price",
            row_no,
            errors,
        );
    }
}

impl RowValidatorTrait for RowValidator {
    fn validate_row(&self, kind: EntityKind, row: &RawRow, index: usize) -> Vec<ValidationError> {
        let row_no = row_number(index);
        let mut errors = Vec::new();

        match kind {
            EntityKind::Product => self.validate_product(row, row_no, &mut errors),
            EntityKind::Equipment => self.validate_equipment(row, row_no, &mut errors),
        }

        errors
    }
}

fn check_name(row: &RawRow, row_no: usize, errors: &mut Vec<ValidationError>) {
    if row.text("name").is_none() {
        errors.push(ValidationError::field_error(
            row_no,
            "name",
            FieldIssue::Missing.message("name"),
        ));
    }
}

/// 把转换结果中的问题记为字段错误
fn check<T>(
    result: Result<T, FieldIssue>,
    field: &str,
    row_no: usize,
    errors: &mut Vec<ValidationError>,
) {
    if let Err(issue) = result {
        errors.push(ValidationError::field_error(row_no, field, issue.message(field)));
    }
}

fn enum_message(field: &str, value: &str, allowed: &[String]) -> String {
    format!(
        "{} '{}' is not valid (allowed: {})",
        field,
        value,
        allowed.join(", ")
    )
}
