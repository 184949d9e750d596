// ==========================================
// 目录批量导入 - 整批校验器实现
// ==========================================
// 职责: 逐行字段校验 + 批内重复查重键检测
// 规则: 首次出现者保留，后续重复行记错误并指向首行行号
// ==========================================

use crate::domain::catalog::{row_number, RawRow, ValidationError};
use crate::domain::types::EntityKind;
use crate::importer::catalog_importer_trait::{
    BatchValidator as BatchValidatorTrait, RowValidator,
};
use std::collections::HashMap;

pub struct BatchValidator {
    row_validator: Box<dyn RowValidator>,
}

impl BatchValidator {
    pub fn new(row_validator: Box<dyn RowValidator>) -> Self {
        Self { row_validator }
    }
}

impl BatchValidatorTrait for BatchValidator {
    fn validate_batch(&self, kind: EntityKind, rows: &[RawRow]) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = rows
            .iter()
            .enumerate()
            .flat_map(|(idx, row)| self.row_validator.validate_row(kind, row, idx))
            .collect();

        // 重复错误排在全部字段错误之后
        errors.extend(detect_duplicates(kind, rows));
        errors
    }
}

/// 检测批内重复查重键
///
/// # 返回
/// - Vec<ValidationError>: 每个重复行一条（不包括第一次出现），field="name"
pub fn detect_duplicates(kind: EntityKind, rows: &[RawRow]) -> Vec<ValidationError> {
    let mut first_occurrence: HashMap<String, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let row_no = row_number(idx);
        let key = row.dedup_key(kind);

        if let Some(first_row) = first_occurrence.get(&key) {
            duplicates.push(ValidationError::field_error(
                row_no,
                "name",
                format!(
                    "Duplicate entry: same {} as row {}",
                    key_description(kind),
                    first_row
                ),
            ));
        } else {
            first_occurrence.insert(key, row_no);
        }
    }

    duplicates
}

/// 查重键字段的可读描述
pub(crate) fn key_description(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Product => "name and SKU",
        EntityKind::Equipment => "name, model and serial number",
    }
}
