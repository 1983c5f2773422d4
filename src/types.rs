//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;

use crate::error::XlsxToHtmlError;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日付書式付きのセル（シリアル値から変換済み）
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    ///
    /// 空白のみの文字列も空として扱います。
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 値を表示用の文字列に変換（書式適用前の生テキスト）
    ///
    /// 数値は最短表現で出力されるため、`1901.0` は `"1901"` になります。
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::DateTime(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }

    /// 前後の空白を除去した表示用文字列
    pub fn as_trimmed_text(&self) -> String {
        self.as_text().trim().to_string()
    }
}

/// 1行分のレコード
///
/// `SheetTable::select()` で指定した列の順序で値を保持します。
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record {
    /// 0始まりのシート上の行番号（ヘッダー行を含む）
    pub row: usize,
    values: Vec<CellValue>,
}

impl Record {
    pub fn new(row: usize, values: Vec<CellValue>) -> Self {
        Self { row, values }
    }

    /// 指定位置のフィールド値。範囲外は空セル扱い
    pub fn field(&self, idx: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.values.get(idx).unwrap_or(&EMPTY)
    }
}

/// ヘッダー行付きのシートデータ
///
/// ヘッダー行は使用範囲の先頭行です。データ行のうち、すべてのセルが空の行は
/// 読み込み時に除外されます。
#[derive(Debug, Clone)]
pub(crate) struct SheetTable {
    /// シート名
    pub sheet: String,

    /// ヘッダー名（前後の空白を除去済み）
    pub headers: Vec<String>,

    /// データ行（行番号と値）
    pub rows: Vec<(usize, Vec<CellValue>)>,
}

impl SheetTable {
    /// ヘッダー名から列インデックスを取得
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 列インデックス
    /// * `Err(XlsxToHtmlError::MissingColumn)` - ヘッダーに存在しない場合
    pub fn column_index(&self, name: &str) -> Result<usize, XlsxToHtmlError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| XlsxToHtmlError::MissingColumn {
                sheet: self.sheet.clone(),
                column: name.to_string(),
            })
    }

    /// 必須列を指定順に射影したレコード列を返す
    ///
    /// いずれかの列が存在しない場合は、行を1つも処理せずにエラーを返します。
    pub fn select(&self, columns: &[&str]) -> Result<Vec<Record>, XlsxToHtmlError> {
        let indices = columns
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self
            .rows
            .iter()
            .map(|(row, values)| {
                let projected = indices
                    .iter()
                    .map(|&i| values.get(i).cloned().unwrap_or(CellValue::Empty))
                    .collect();
                Record::new(*row, projected)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_table() -> SheetTable {
        SheetTable {
            sheet: "Events".to_string(),
            headers: vec![
                "StartDate".to_string(),
                "EndDate".to_string(),
                "Description".to_string(),
            ],
            rows: vec![
                (
                    1,
                    vec![
                        CellValue::String("2025-01-01".to_string()),
                        CellValue::Empty,
                        CellValue::String("New Year".to_string()),
                    ],
                ),
                (2, vec![CellValue::String("2025-02-01".to_string())]),
            ],
        }
    }

    #[test]
    fn test_cell_value_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::String("   ".to_string()).is_empty());
        assert!(!CellValue::String("x".to_string()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_cell_value_as_text() {
        assert_eq!(CellValue::Number(1901.0).as_text(), "1901");
        assert_eq!(CellValue::Number(2.5).as_text(), "2.5");
        assert_eq!(CellValue::Bool(true).as_text(), "TRUE");
        assert_eq!(CellValue::Empty.as_text(), "");
        assert_eq!(CellValue::Error("#N/A".to_string()).as_text(), "#N/A");

        let date = NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(date).as_text(), "2025-03-04");

        let with_time = NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(
            CellValue::DateTime(with_time).as_text(),
            "2025-03-04 09:30:00"
        );
    }

    #[test]
    fn test_select_projects_in_requested_order() {
        let table = sample_table();
        let records = table.select(&["Description", "StartDate"]).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 1);
        assert_eq!(records[0].field(0).as_text(), "New Year");
        assert_eq!(records[0].field(1).as_text(), "2025-01-01");

        // 短い行は空セルで補完される
        assert!(records[1].field(0).is_empty());
        assert!(records[1].field(5).is_empty());
    }

    #[test]
    fn test_select_missing_column() {
        let table = sample_table();
        match table.select(&["StartDate", "Location"]) {
            Err(XlsxToHtmlError::MissingColumn { sheet, column }) => {
                assert_eq!(sheet, "Events");
                assert_eq!(column, "Location");
            }
            other => panic!("Expected MissingColumn error, got {:?}", other),
        }
    }
}
