// ==========================================
// 目录批量导入 - 字段类型转换
// ==========================================
// 职责: 原始单元格 → 数值 / 整数 / 布尔，NULL 与空白统一视为缺失
// 使用方: RowValidator（只关心错误）与 PayloadBuilder（只关心值）
// ==========================================

use crate::domain::catalog::RawRow;
use serde_json::Value;

/// 字段转换问题
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Missing,
    NotNumber,
    NotInteger,
    Negative,
    NotBoolean,
}

impl FieldIssue {
    /// 面向用户的错误描述（以字段名开头）
    pub fn message(&self, field: &str) -> String {
        match self {
            FieldIssue::Missing => format!("{} is required", field),
            FieldIssue::NotNumber => format!("{} must be a valid number", field),
            FieldIssue::NotInteger => format!("{} must be a whole number", field),
            FieldIssue::Negative => format!("{} must be greater than or equal to 0", field),
            FieldIssue::NotBoolean => format!("{} must be true or false", field),
        }
    }
}

pub type FieldResult<T> = Result<Option<T>, FieldIssue>;

/// 缺失即报错
pub fn required<T>(value: FieldResult<T>) -> Result<T, FieldIssue> {
    value?.ok_or(FieldIssue::Missing)
}

/// 解析数值（JSON 数字或可解析的文本；拒绝 NaN/∞ 与布尔）
pub fn number(row: &RawRow, field: &str) -> FieldResult<f64> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or(FieldIssue::NotNumber),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or(FieldIssue::NotNumber)
        }
        Some(_) => Err(FieldIssue::NotNumber),
    }
}

/// 解析非负数值
pub fn non_negative_number(row: &RawRow, field: &str) -> FieldResult<f64> {
    match number(row, field)? {
        Some(v) if v < 0.0 => Err(FieldIssue::Negative),
        other => Ok(other),
    }
}

/// 解析非负整数（"10" 与 "10.0" 均接受，"1.5" 拒绝）
pub fn non_negative_integer(row: &RawRow, field: &str) -> FieldResult<i64> {
    if let Some(Value::String(s)) = row.get(field) {
        if let Ok(v) = s.trim().parse::<i64>() {
            return if v < 0 { Err(FieldIssue::Negative) } else { Ok(Some(v)) };
        }
    }

    let value = match number(row, field) {
        Ok(Some(v)) => v,
        Ok(None) => return Ok(None),
        Err(_) => return Err(FieldIssue::NotInteger),
    };

    if value.fract() != 0.0 || value.abs() >= i64::MAX as f64 {
        return Err(FieldIssue::NotInteger);
    }
    if value < 0.0 {
        return Err(FieldIssue::Negative);
    }
    Ok(Some(value as i64))
}

/// 解析布尔（true/false、yes/no、y/n、1/0，不区分大小写）
pub fn boolean(row: &RawRow, field: &str) -> FieldResult<bool> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Ok(Some(true)),
            Some(0) => Ok(Some(false)),
            _ => Err(FieldIssue::NotBoolean),
        },
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "true" | "yes" | "y" | "1" => Ok(Some(true)),
            "false" | "no" | "n" | "0" => Ok(Some(false)),
            _ => Err(FieldIssue::NotBoolean),
        },
        Some(_) => Err(FieldIssue::NotBoolean),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRow {
        RawRow::from_pairs([("f", value)])
    }

    #[test]
    fn test_number_accepts_text_and_json() {
        assert_eq!(number(&row(json!("250.5")), "f"), Ok(Some(250.5)));
        assert_eq!(number(&row(json!(3)), "f"), Ok(Some(3.0)));
        assert_eq!(number(&row(json!("  ")), "f"), Ok(None));
        assert_eq!(number(&RawRow::new(), "f"), Ok(None));
    }

    #[test]
    fn test_number_rejects_garbage() {
        assert_eq!(number(&row(json!("abc")), "f"), Err(FieldIssue::NotNumber));
        assert_eq!(number(&row(json!("NaN")), "f"), Err(FieldIssue::NotNumber));
        assert_eq!(number(&row(json!(true)), "f"), Err(FieldIssue::NotNumber));
    }

    #[test]
    fn test_non_negative_number() {
        assert_eq!(non_negative_number(&row(json!("0")), "f"), Ok(Some(0.0)));
        assert_eq!(non_negative_number(&row(json!("-0.01")), "f"), Err(FieldIssue::Negative));
    }

    #[test]
    fn test_non_negative_integer() {
        assert_eq!(non_negative_integer(&row(json!("10")), "f"), Ok(Some(10)));
        assert_eq!(non_negative_integer(&row(json!("10.0")), "f"), Ok(Some(10)));
        assert_eq!(non_negative_integer(&row(json!(7)), "f"), Ok(Some(7)));
        assert_eq!(non_negative_integer(&row(json!("-1")), "f"), Err(FieldIssue::Negative));
        assert_eq!(non_negative_integer(&row(json!("1.5")), "f"), Err(FieldIssue::NotInteger));
        assert_eq!(non_negative_integer(&row(json!("ten")), "f"), Err(FieldIssue::NotInteger));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean(&row(json!("Yes")), "f"), Ok(Some(true)));
        assert_eq!(boolean(&row(json!("0")), "f"), Ok(Some(false)));
        assert_eq!(boolean(&row(json!(false)), "f"), Ok(Some(false)));
        assert_eq!(boolean(&row(json!("maybe")), "f"), Err(FieldIssue::NotBoolean));
    }

    #[test]
    fn test_required_reports_missing() {
        assert_eq!(required(number(&RawRow::new(), "price")), Err(FieldIssue::Missing));
        assert_eq!(FieldIssue::Missing.message("price"), "price is required");
    }
}
