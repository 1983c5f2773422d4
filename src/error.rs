//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxhtmlクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、HTML生成、出力ファイルの書き込み中に発生する
/// 致命的なエラーを統一的に扱います。
/// 行単位の書式化の失敗（解析できない日付など）はエラーにならず、
/// 生テキストまたは空文字列にフォールバックします。
///
/// # エラーの種類
///
/// - `Io`: 入力ファイルが存在しない、出力ディレクトリを作成できないなど
/// - `Parse`: スプレッドシートの解析エラー（calamine由来）
/// - `SheetNotFound`: 指定されたシートが存在しない
/// - `MissingColumn`: 必須列がヘッダー行に存在しない
/// - `EmptySheet`: シートにヘッダー行がない
/// - `Config`: 設定の検証に失敗したエラー
/// - `SecurityViolation`: 入力サイズ制限や出力ファイル名の検証に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxhtml::XlsxToHtmlError;
/// use std::fs::File;
///
/// fn open_input(path: &str) -> Result<(), XlsxToHtmlError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToHtmlError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが原因です。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// 指定されたシートがワークブックに存在しない
    #[error("Sheet '{sheet}' not found (available: {available})")]
    SheetNotFound {
        /// 要求されたシート名（インデックス指定の場合は `#n`）
        sheet: String,
        /// ワークブックに存在するシート名（カンマ区切り）
        available: String,
    },

    /// 必須列がヘッダー行に存在しない
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxhtml::XlsxToHtmlError;
    ///
    /// let error = XlsxToHtmlError::MissingColumn {
    ///     sheet: "Events".to_string(),
    ///     column: "StartDate".to_string(),
    /// };
    /// // 出力: "Required column 'StartDate' not found in sheet 'Events'"
    /// println!("{}", error);
    /// ```
    #[error("Required column '{column}' not found in sheet '{sheet}'")]
    MissingColumn {
        /// シート名
        sheet: String,
        /// 見つからなかった列名
        column: String,
    },

    /// シートにヘッダー行が存在しない
    #[error("Sheet '{0}' has no header row")]
    EmptySheet(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `TransformerBuilder::build()`時に無効な設定が検出された場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限超過や、出力ファイル名にパス区切り文字が
    /// 含まれている場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: XlsxToHtmlError = io_err.into();

        match error {
            XlsxToHtmlError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: XlsxToHtmlError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse spreadsheet"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_sheet_not_found_display() {
        let error = XlsxToHtmlError::SheetNotFound {
            sheet: "Events".to_string(),
            available: "Sheet1, Sheet2".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("'Events'"));
        assert!(msg.contains("Sheet1, Sheet2"));
    }

    #[test]
    fn test_missing_column_fields() {
        let error = XlsxToHtmlError::MissingColumn {
            sheet: "Officers".to_string(),
            column: "Office".to_string(),
        };

        match &error {
            XlsxToHtmlError::MissingColumn { sheet, column } => {
                assert_eq!(sheet, "Officers");
                assert_eq!(column, "Office");
            }
            _ => panic!("Expected MissingColumn error"),
        }
        assert_eq!(
            error.to_string(),
            "Required column 'Office' not found in sheet 'Officers'"
        );
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), XlsxToHtmlError> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(XlsxToHtmlError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_all_error_formats() {
        let io_err: XlsxToHtmlError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        let config_err = XlsxToHtmlError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let empty = XlsxToHtmlError::EmptySheet("Sheet1".to_string());
        assert!(empty.to_string().contains("no header row"));

        let security = XlsxToHtmlError::SecurityViolation("too big".to_string());
        assert!(security.to_string().starts_with("Security violation"));
    }
}
