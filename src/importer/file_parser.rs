// ==========================================
// 目录批量导入 - 文件解析器实现
// ==========================================
// 职责: 表格文件 → 有序原始行（首行为表头）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 约定: 表头与单元格去除首尾空白；完全空白的行被跳过
//       跳过空白行后，错误行号（index + 2）按非空数据行计数，
//       文件中间存在空白行时与表格实际行号不再一致
// ==========================================

use crate::domain::catalog::RawRow;
use crate::importer::catalog_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 取第一个工作表名
fn first_sheet(sheet_names: Vec<String>) -> ImportResult<String> {
    sheet_names
        .into_iter()
        .next()
        .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))
}

/// 按表头组装一行；全部单元格为空时返回 None
fn assemble_row<I>(headers: &[String], cells: I) -> Option<RawRow>
where
    I: Iterator<Item = String>,
{
    let mut row = RawRow::new();
    let mut has_value = false;

    for (header, value) in headers.iter().zip(cells) {
        if header.is_empty() {
            continue;
        }
        let value = value.trim().to_string();
        has_value |= !value.is_empty();
        row.insert(header.clone(), value);
    }

    has_value.then_some(row)
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if let Some(row) = assemble_row(&headers, record.iter().map(|v| v.to_string())) {
                rows.push(row);
            }
        }

        debug!(file = %file_path.display(), rows = rows.len(), "CSV 解析完成");
        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        // 只读第一个 sheet
        let sheet_name = first_sheet(workbook.sheet_names())?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut sheet_rows = range.rows();
        let headers: Vec<String> = match sheet_rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect(),
            None => return Ok(Vec::new()),
        };

        let rows: Vec<RawRow> = sheet_rows
            .filter_map(|data_row| assemble_row(&headers, data_row.iter().map(|c| c.to_string())))
            .collect();

        debug!(file = %file_path.display(), sheet = %sheet_name, rows = rows.len(), "Excel 解析完成");
        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRow>> {
        let path = file_path.as_ref();

        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_rows(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_rows(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&[
            "name, sku ,price,stock_quantity",
            "Infusion Pump,IP-1,250.5,10",
            "Gauze , G-1,2,400",
        ]);

        let rows = CsvParser.parse_to_raw_rows(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("sku").as_deref(), Some("IP-1"));
        assert_eq!(rows[1].text("name").as_deref(), Some("Gauze"));
        assert_eq!(rows[1].text("price").as_deref(), Some("2"));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_rows(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["name,sku", "Pump,A", ",", "Mask,M"]);

        let rows = CsvParser.parse_to_raw_rows(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text("name").as_deref(), Some("Mask"));
    }

    #[test]
    fn test_short_row_leaves_trailing_columns_absent() {
        let temp_file = csv_file(&["name,model,serial_number", "MRI"]);

        let rows = CsvParser.parse_to_raw_rows(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_present("model"));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let result = UniversalFileParser.parse(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "json"));
    }

    // ===== Excel =====

    fn xlsx_file() -> tempfile::NamedTempFile {
        Builder::new().suffix(".xlsx").tempfile().unwrap()
    }

    #[test]
    fn test_excel_parser_reads_first_sheet() {
        let temp_file = xlsx_file();
        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, " name ").unwrap();
        sheet.write_string(0, 1, "price").unwrap();
        sheet.write_string(0, 2, "stock_quantity").unwrap();
        sheet.write_string(1, 0, "Infusion Pump").unwrap();
        sheet.write_number(1, 1, 250.5).unwrap();
        sheet.write_number(1, 2, 10.0).unwrap();
        // 第 3 行留空
        sheet.write_string(3, 0, " Gauze ").unwrap();
        sheet.write_number(3, 1, 2.0).unwrap();
        sheet.write_number(3, 2, 400.0).unwrap();

        let other = workbook.add_worksheet();
        other.write_string(0, 0, "name").unwrap();
        other.write_string(1, 0, "Not Imported").unwrap();

        workbook.save(temp_file.path()).unwrap();

        let rows = ExcelParser.parse_to_raw_rows(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("name").as_deref(), Some("Infusion Pump"));
        assert_eq!(rows[0].text("price").as_deref(), Some("250.5"));
        assert_eq!(rows[0].text("stock_quantity").as_deref(), Some("10"));
        assert_eq!(rows[1].text("name").as_deref(), Some("Gauze"));
        assert_eq!(rows[1].text("stock_quantity").as_deref(), Some("400"));
    }

    #[test]
    fn test_universal_parser_dispatches_xlsx() {
        let temp_file = xlsx_file();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "name").unwrap();
        sheet.write_string(0, 1, "model").unwrap();
        sheet.write_string(1, 0, "MRI").unwrap();
        sheet.write_string(1, 1, "X1").unwrap();
        workbook.save(temp_file.path()).unwrap();

        let rows = UniversalFileParser.parse(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("model").as_deref(), Some("X1"));
    }

    #[test]
    fn test_workbook_without_sheets_is_rejected() {
        let err = first_sheet(Vec::new()).unwrap_err();

        assert!(matches!(err, ImportError::ExcelParseError(ref msg) if msg == "workbook has no sheets"));
        assert_eq!(
            first_sheet(vec!["Products".to_string(), "Notes".to_string()]).unwrap(),
            "Products"
        );
    }

    #[test]
    fn test_excel_parser_rejects_csv_extension() {
        let temp_file = csv_file(&["name"]);
        let result = ExcelParser.parse_to_raw_rows(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "csv"));
    }
}
