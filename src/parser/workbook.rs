//! Workbook Parser
//!
//! calamineのラッパーとして、シート選択とヘッダー付きテーブルの抽出を提供します。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;
use std::io::{Cursor, Read, Seek};

use crate::api::SheetSelector;
use crate::error::XlsxToHtmlError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, SheetTable};

/// Excelシリアル値の上限（9999-12-31）
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// ワークブックパーサー
///
/// xlsx / xlsm / xlsb / xls / ods のいずれも calamine の自動判定で開きます。
pub(crate) struct WorkbookParser<RS: Read + Seek> {
    workbook: Sheets<RS>,
}

impl WorkbookParser<Cursor<Vec<u8>>> {
    /// 入力全体をメモリに読み込み、ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー
    /// * `security` - 入力サイズの上限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(XlsxToHtmlError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxToHtmlError::Parse)` - スプレッドシートとして解析できない場合
    pub fn open<R: Read>(reader: R, security: &SecurityConfig) -> Result<Self, XlsxToHtmlError> {
        // 上限 + 1 バイトまで読んで超過を検出する
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(security.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > security.max_input_file_size {
            return Err(XlsxToHtmlError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                security.max_input_file_size
            )));
        }

        debug!("read {} bytes of spreadsheet input", bytes_read);

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }
}

impl<RS: Read + Seek> WorkbookParser<RS> {
    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシート名を決定
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(XlsxToHtmlError::SheetNotFound)` - シートが存在しない場合
    pub fn resolve_sheet(&self, selector: &SheetSelector) -> Result<String, XlsxToHtmlError> {
        let names = self.sheet_names();
        let not_found = |sheet: String| XlsxToHtmlError::SheetNotFound {
            sheet,
            available: names.join(", "),
        };

        match selector {
            SheetSelector::First => names
                .first()
                .cloned()
                .ok_or_else(|| not_found("#0".to_string())),

            SheetSelector::Index(index) => names
                .get(*index)
                .cloned()
                .ok_or_else(|| not_found(format!("#{}", index))),

            SheetSelector::Name(name) => {
                if names.iter().any(|n| n == name) {
                    Ok(name.clone())
                } else {
                    Err(not_found(name.clone()))
                }
            }
        }
    }

    /// シートを読み込み、ヘッダー付きテーブルに変換
    ///
    /// 使用範囲の先頭行をヘッダーとし、残りの行をデータ行とします。
    /// すべてのセルが空の行はレコードとして扱いません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(SheetTable)` - 読み込んだテーブル
    /// * `Err(XlsxToHtmlError::EmptySheet)` - ヘッダー行が存在しない場合
    /// * `Err(XlsxToHtmlError::Parse)` - シートの解析に失敗した場合
    pub fn read_table(&mut self, sheet_name: &str) -> Result<SheetTable, XlsxToHtmlError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        let mut rows = range.rows().enumerate();

        let headers: Vec<String> = match rows.next() {
            Some((_, header_row)) => header_row
                .iter()
                .map(|cell| convert_cell(cell).as_trimmed_text())
                .collect(),
            None => return Err(XlsxToHtmlError::EmptySheet(sheet_name.to_string())),
        };

        if headers.iter().all(|h| h.is_empty()) {
            return Err(XlsxToHtmlError::EmptySheet(sheet_name.to_string()));
        }

        let mut data_rows = Vec::new();
        for (idx, row) in rows {
            let values: Vec<CellValue> = row.iter().map(convert_cell).collect();
            if values.iter().all(CellValue::is_empty) {
                continue;
            }
            data_rows.push((first_row + idx, values));
        }

        debug!(
            "sheet '{}': {} columns, {} data rows",
            sheet_name,
            headers.len(),
            data_rows.len()
        );

        Ok(SheetTable {
            sheet: sheet_name.to_string(),
            headers,
            rows: data_rows,
        })
    }
}

/// calamineのセル値を内部表現に変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // 1904年システムのワークブックは calamine 側で補正される
        Data::DateTime(dt) if dt.is_datetime() => match dt.as_datetime() {
            Some(value) => CellValue::DateTime(value),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        #[allow(unreachable_patterns)]
        _ => CellValue::Empty,
    }
}

/// Excelシリアル値（1900年システム）を日時に変換
///
/// 日付書式のない数値セルに使用します（日付書式付きセルは calamine が変換）。
///
/// - シリアル値1 = 1900-01-01
/// - 60未満はExcelの1900年うるう年バグの影響を受けないよう1日ずらす
/// - 小数部は時刻（秒単位に丸め）
///
/// 範囲外（負数、9999-12-31超、NaN）の場合は `None` を返します。
pub(crate) fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > MAX_EXCEL_SERIAL + 1.0 {
        return None;
    }

    let days = serial.floor();
    let seconds = ((serial - days) * 86_400.0).round() as i64;
    let epoch = if days < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(days as i64))?
        .checked_add_signed(Duration::seconds(seconds))
}


// シートの読み込みは実際のワークブックが必要なため、統合テスト（tests/）で検証します。
