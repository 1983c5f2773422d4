//! Parser Module
//!
//! calamineを使用したスプレッドシート読み込みの実装。
//! シートの使用範囲の先頭行をヘッダーとして、列名付きのレコード列を抽出します。

mod workbook;

pub(crate) use workbook::{excel_serial_to_datetime, WorkbookParser};
