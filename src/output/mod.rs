//! Output Module
//!
//! HTML断片（テーブル、アコーディオン項目）と文書全体の生成、および出力ファイルの書き込み。

mod html;
pub(crate) mod styles;
mod writer;

pub(crate) use html::{
    render_accordion_document, render_pair_table, AccordionSection, DocumentShell, SectionBody,
};
pub use writer::next_available_path;
pub(crate) use writer::{output_stem, write_document};
