// ==========================================
// 医药产品目录服务 - 文件解析器实现
// ==========================================
// 阶段 1: 上传内容 → 原始行记录
// 支持: Excel (.xlsx/.xlsm/.xls) / ODS / CSV
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::product_importer_trait::{FileParser, RawRow};
use calamine::{open_workbook_auto_from_rs, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;

/// 按表头补齐一行（缺失列填 ""）
fn build_row<I>(headers: &[String], cells: I) -> RawRow
where
    I: IntoIterator<Item = String>,
{
    let mut cells = cells.into_iter();
    let mut row = RawRow::with_capacity(headers.len());

    for header in headers {
        let value = cells.next().unwrap_or_default();
        // 空表头列无法被别名表命中,直接丢弃
        if header.is_empty() || row.contains_key(header) {
            continue;
        }
        row.insert(header.clone(), value);
    }

    row
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, data: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(data);

        // 读取表头（非 UTF-8 内容按有损方式转换）
        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader);
        }

        let mut records = Vec::new();
        for result in reader.byte_records() {
            let record = result?;
            let cells = record
                .iter()
                .map(|v| String::from_utf8_lossy(v).into_owned());
            records.push(build_row(&headers, cells));
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现（xlsx/xls/xlsb/ods 自动识别）
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, data: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(data.to_vec()))?;

        // 只读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no worksheet".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows.next().ok_or(ImportError::MissingHeader)?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader);
        }

        let records = rows
            .map(|data_row| build_row(&headers, data_row.iter().map(|cell| cell.to_string())))
            .collect();

        Ok(records)
    }
}

// ==========================================
// 表格格式判定
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Spreadsheet,
    Csv,
}

impl TableFormat {
    /// 优先按扩展名判定,其次按文件头魔数,最后回退 CSV
    pub fn detect(data: &[u8], file_name: Option<&str>) -> ImportResult<Self> {
        let ext = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.trim().to_lowercase());

        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => return Ok(TableFormat::Spreadsheet),
            Some("csv" | "txt") => return Ok(TableFormat::Csv),
            Some(other) if !other.is_empty() && Self::sniff(data).is_none() => {
                return Err(ImportError::UnsupportedFormat(other.to_string()));
            }
            _ => {}
        }

        Ok(Self::sniff(data).unwrap_or(TableFormat::Csv))
    }

    fn sniff(data: &[u8]) -> Option<Self> {
        const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
        const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

        if data.starts_with(ZIP_MAGIC) || data.starts_with(OLE2_MAGIC) {
            Some(TableFormat::Spreadsheet)
        } else {
            None
        }
    }
}

// ==========================================
// 通用文件解析器（根据格式自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse(&self, data: &[u8], file_name: Option<&str>) -> ImportResult<Vec<RawRow>> {
        if data.is_empty() {
            return Err(ImportError::MissingHeader);
        }

        match TableFormat::detect(data, file_name)? {
            TableFormat::Spreadsheet => ExcelParser.parse_to_raw_records(data),
            TableFormat::Csv => CsvParser.parse_to_raw_records(data),
        }
    }
}
