// ==========================================
// 目录批量导入 - 目录数据模型
// ==========================================
// 职责: 原始行 / 校验错误 / 上传结果 / 落库实体 / 查重键
// 生命周期: 全部仅在一次上传调用内存活，本层不落库
// ==========================================

use crate::domain::types::EntityKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// 表头占一行，且数据行下标从 0 开始 → 文件行号 = index + 2
pub const HEADER_ROW_OFFSET: usize = 2;

/// 查重键字段之间的分隔符
pub const DEDUP_KEY_SEPARATOR: char = '|';

/// 字段值中分隔符与转义符本身的转义前缀
pub const DEDUP_KEY_ESCAPE: char = '\\';

/// 数据行下标 → 文件行号
pub fn row_number(index: usize) -> usize {
    index + HEADER_ROW_OFFSET
}

// ==========================================
// RawRow - 解析器产出的原始行
// ==========================================
// 列名 → 值；列顺序无意义，行顺序由批次 Vec 保证
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: HashMap<String, Value>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 (列名, 值) 序列构造
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, column: K, value: V) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.cells.get(field)
    }

    /// 取字段文本值
    ///
    /// # 返回
    /// - Some(String): 非空值（已 TRIM；数字/布尔转为文本）
    /// - None: 列缺失 / null / 空白字符串
    pub fn text(&self, field: &str) -> Option<String> {
        let rendered = match self.cells.get(field)? {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        };

        if rendered.is_empty() {
            None
        } else {
            Some(rendered)
        }
    }

    /// 字段是否"存在"（非 null 且非空白）
    pub fn is_present(&self, field: &str) -> bool {
        self.text(field).is_some()
    }

    /// 取字段原样文本（不 TRIM），供精确匹配的枚举字段使用
    ///
    /// 空白判定与 `text` 一致
    pub fn raw_text(&self, field: &str) -> Option<String> {
        match self.cells.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::String(_) => None,
            _ => self.text(field),
        }
    }

    /// 计算本行的查重键
    pub fn dedup_key(&self, kind: EntityKind) -> String {
        dedup_key(kind, |field| self.text(field))
    }
}

// ==========================================
// Dedup Key - 查重键
// ==========================================
// 规则: 各键字段各自 TRIM、转义分隔符后按固定顺序拼接，整体转小写
// 批内查重、库内查重共用同一函数
pub fn dedup_key<F>(kind: EntityKind, field: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut key = String::new();

    for (idx, name) in kind.key_fields().iter().enumerate() {
        if idx > 0 {
            key.push(DEDUP_KEY_SEPARATOR);
        }
        let value = field(name).unwrap_or_default();
        for ch in value.trim().chars() {
            if ch == DEDUP_KEY_SEPARATOR || ch == DEDUP_KEY_ESCAPE {
                key.push(DEDUP_KEY_ESCAPE);
            }
            key.push(ch);
        }
    }

    key.to_lowercase()
}

// ==========================================
// ValidationError - 行级错误
// ==========================================
// field 为空表示行级错误（持久化失败/认证失败）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn field_error(row: usize, field: &str, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn row_error(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            field: String::new(),
            message: message.into(),
        }
    }
}

// ==========================================
// UploadResult - 上传结果
// ==========================================
// 不变量: success_count + failed_count == 已尝试行数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub errors: Vec<ValidationError>,
}

impl UploadResult {
    /// 整批拒绝（认证失败 / 结构校验未通过 / 查重键加载失败）
    pub fn rejected(total_rows: usize, errors: Vec<ValidationError>) -> Self {
        Self {
            success_count: 0,
            failed_count: total_rows,
            errors,
        }
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, error: ValidationError) {
        self.failed_count += 1;
        self.errors.push(error);
    }

    pub fn attempted(&self) -> usize {
        self.success_count + self.failed_count
    }

    pub fn is_clean(&self) -> bool {
        self.failed_count == 0 && self.errors.is_empty()
    }
}

// ==========================================
// ProductRecord - 产品落库实体
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,                    // 记录 ID（UUID）
    pub owner_id: String,              // 制造商 ID（归属范围）
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
    pub category: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,             // 默认 false
    pub created_at: DateTime<Utc>,
}

// ==========================================
// EquipmentRecord - 设备落库实体
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub condition: String,             // 默认 "New"
    pub status: String,                // 默认 "Available"
    pub price: Option<f64>,
    pub lease_rate: Option<f64>,
    pub quantity: i64,                 // 默认 1
    pub sales_option: String,          // 默认 "Both"
    pub pay_per_use_price: Option<f64>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 类型化插入载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogRecord {
    Product(ProductRecord),
    Equipment(EquipmentRecord),
}

impl CatalogRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            CatalogRecord::Product(_) => EntityKind::Product,
            CatalogRecord::Equipment(_) => EntityKind::Equipment,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CatalogRecord::Product(p) => &p.id,
            CatalogRecord::Equipment(e) => &e.id,
        }
    }
}
