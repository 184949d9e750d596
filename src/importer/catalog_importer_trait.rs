// ==========================================
// 目录批量导入 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各组件接口（不包含实现）
// 流程: 解析 → 整批校验（硬闸门）→ 加载已有查重键 → 逐行落库
// ==========================================

use crate::domain::catalog::{RawRow, UploadResult, ValidationError};
use crate::domain::types::EntityKind;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// CatalogImporter Trait
// ==========================================
// 用途: 对外的四个入口
// 实现者: CatalogImporterImpl
#[async_trait]
pub trait CatalogImporter: Send + Sync {
    /// 校验产品批次（不落库）
    fn validate_products(&self, rows: &[RawRow]) -> Vec<ValidationError>;

    /// 校验设备批次（不落库）
    fn validate_equipment(&self, rows: &[RawRow]) -> Vec<ValidationError>;

    /// 上传产品批次
    ///
    /// # 返回
    /// - 始终返回完整的 UploadResult，任何故障都折叠进 errors
    async fn upload_products(&self, rows: &[RawRow]) -> UploadResult;

    /// 上传设备批次
    async fn upload_equipment(&self, rows: &[RawRow]) -> UploadResult;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 解析协作方（文件 → 有序原始行）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行（首行为表头；完全空白的行被跳过）
    ///
    /// 注意: 返回的第 i 行对应错误行号 i + 2，空白行不占行号；
    /// 文件中间有空白行时，该行号与表格软件中显示的行号不一致
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 单行字段规则校验（纯函数，无 I/O）
// 实现者: RowValidatorImpl
pub trait RowValidator: Send + Sync {
    /// 校验单行
    ///
    /// # 参数
    /// - kind: 实体种类
    /// - row: 原始行
    /// - index: 数据行下标（0 起），错误行号 = index + 2
    ///
    /// # 返回
    /// - Vec<ValidationError>: 同一行可有多条错误
    fn validate_row(&self, kind: EntityKind, row: &RawRow, index: usize) -> Vec<ValidationError>;
}

// ==========================================
// BatchValidator Trait
// ==========================================
// 用途: 整批校验 + 批内查重
// 实现者: BatchValidatorImpl
pub trait BatchValidator: Send + Sync {
    /// 校验整批
    ///
    /// # 返回
    /// - 先按行序给出全部字段错误，再按行序追加批内重复错误
    fn validate_batch(&self, kind: EntityKind, rows: &[RawRow]) -> Vec<ValidationError>;
}
