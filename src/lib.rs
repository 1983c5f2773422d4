//! xlsxhtml - スプレッドシートからHTMLアコーディオン・テーブル断片を生成するクレート
//!
//! 団体サイト向けに、スプレッドシート（XLSX / XLS / ODS）の行データを
//! Bootstrap 5 のアコーディオン文書、または複数段のテーブル断片に変換します。
//!
//! | 変換の種類 | 入力列 | 出力 |
//! |-----------|--------|------|
//! | `SocialAccordion` | `Title`, `Description` | 1行 = 1項目のアコーディオン文書 |
//! | `CalendarAccordion` | `StartDate`, `EndDate`, `Description` | 月ごとのアコーディオン + イベントテーブル |
//! | `PresidentsTable` | `Year`, `Name` | 4段のテーブル断片 |
//! | `OfficersTable` | `Name`, `Office` | 1段のテーブル断片 |
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxhtml::TransformKind;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 既定の設定（./output に書き込み）で変換
//!     let output = TransformKind::CalendarAccordion.transform("calendar.xlsx")?;
//!     println!("wrote {}", output.display());
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use xlsxhtml::{SheetSelector, TransformKind, TransformerBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transformer = TransformerBuilder::new(TransformKind::PresidentsTable)
//!         .with_output_dir("site/fragments")
//!         .with_sheet_selector(SheetSelector::Name("Past Presidents".to_string()))
//!         .with_columns(3)
//!         .build()?;
//!
//!     let report = transformer.transform_with_report("presidents.xlsx", None)?;
//!     println!("{} records -> {}", report.records, report.output.display());
//!     Ok(())
//! }
//! ```
//!
//! # Render to String
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxhtml::{TransformKind, TransformerBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transformer = TransformerBuilder::new(TransformKind::SocialAccordion).build()?;
//!     let html = transformer.render_to_string(File::open("social.xlsx")?)?;
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod calendar;
mod error;
mod formatter;
mod grid;
mod output;
mod parser;
mod pipeline;
mod security;
mod types;

// 公開API
pub use api::{SheetSelector, TransformKind};
pub use builder::{
    TransformReport, Transformer, TransformerBuilder, DEFAULT_ACCORDION_ID, DEFAULT_OUTPUT_DIR,
    DEFAULT_TITLE,
};
pub use error::XlsxToHtmlError;
pub use output::next_available_path;
