//! Pipeline Module
//!
//! 変換の種類ごとに、読み込んだテーブルを書式化してHTML文書を組み立てる。

use log::debug;

use crate::api::TransformKind;
use crate::builder::TransformConfig;
use crate::calendar::{group_events, CalendarEvent};
use crate::error::XlsxToHtmlError;
use crate::output::styles::{CALENDAR_CSS, OFFICERS_CSS, PRESIDENTS_CSS, SOCIAL_CSS};
use crate::output::{
    render_accordion_document, render_pair_table, AccordionSection, SectionBody,
};
use crate::types::{CellValue, SheetTable};

/// 社交イベントのタイトルが空の場合の見出し
const UNTITLED_TITLE: &str = "Untitled";

/// 役員名が空の場合の表示
const MISSING_OFFICER_NAME: &str = "N/A";

/// 生成済みの文書と集計
#[derive(Debug, Clone)]
pub(crate) struct Rendered {
    /// HTML文書（または断片）
    pub html: String,

    /// 出力したレコード数
    pub records: usize,

    /// アコーディオン項目数（テーブル系は1）
    pub sections: usize,
}

/// テーブルを変換の種類に応じて描画する
///
/// 必須列の欠落はここで検出され、何も出力しないままエラーになります。
pub(crate) fn render(
    kind: TransformKind,
    table: &SheetTable,
    config: &TransformConfig,
) -> Result<Rendered, XlsxToHtmlError> {
    let mut buffer = Vec::new();
    let columns = config.columns.or(kind.default_columns()).unwrap_or(1);

    let (records, sections) = match kind {
        TransformKind::SocialAccordion => render_social(&mut buffer, table, config)?,
        TransformKind::CalendarAccordion => render_calendar(&mut buffer, table, config)?,
        TransformKind::PresidentsTable => render_pairs(
            &mut buffer,
            table,
            kind,
            PRESIDENTS_CSS,
            columns,
            |v| v.as_trimmed_text(),
        )?,
        TransformKind::OfficersTable => render_pairs(
            &mut buffer,
            table,
            kind,
            OFFICERS_CSS,
            columns,
            |v| {
                let name = v.as_trimmed_text();
                if name.is_empty() {
                    MISSING_OFFICER_NAME.to_string()
                } else {
                    name
                }
            },
        )?,
    };

    let html = String::from_utf8(buffer).map_err(|e| {
        XlsxToHtmlError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    debug!(
        "{}: rendered {} records in {} sections ({} bytes)",
        kind,
        records,
        sections,
        html.len()
    );

    Ok(Rendered {
        html,
        records,
        sections,
    })
}

/// 1行 = 1アコーディオン項目
fn render_social(
    buffer: &mut Vec<u8>,
    table: &SheetTable,
    config: &TransformConfig,
) -> Result<(usize, usize), XlsxToHtmlError> {
    let records = table.select(TransformKind::SocialAccordion.required_columns())?;

    let items: Vec<(String, String)> = records
        .iter()
        .map(|record| {
            let title = record.field(0).as_trimmed_text();
            let title = if title.is_empty() {
                UNTITLED_TITLE.to_string()
            } else {
                title
            };
            (title, record.field(1).as_text())
        })
        .collect();

    let sections: Vec<AccordionSection<'_>> = items
        .iter()
        .map(|(title, text)| AccordionSection {
            title,
            body: SectionBody::Text(text),
        })
        .collect();

    render_accordion_document(buffer, &config.shell(SOCIAL_CSS), &sections)?;
    Ok((records.len(), sections.len()))
}

/// 月ごとのアコーディオン項目 + 3列のイベントテーブル
fn render_calendar(
    buffer: &mut Vec<u8>,
    table: &SheetTable,
    config: &TransformConfig,
) -> Result<(usize, usize), XlsxToHtmlError> {
    let records = table.select(TransformKind::CalendarAccordion.required_columns())?;

    let groups = group_events(records.iter().map(|r| {
        let (label, event) = CalendarEvent::from_cells(r.field(0), r.field(1), r.field(2));
        if event.start.is_none() && !r.field(0).is_empty() {
            // シート上の行番号（1始まり）
            debug!("row {}: start date kept as text, grouped under '{}'", r.row + 1, label);
        }
        (label, event)
    }));

    let sections: Vec<AccordionSection<'_>> = groups
        .iter()
        .map(|group| AccordionSection {
            title: &group.label,
            body: SectionBody::Events(&group.events),
        })
        .collect();

    render_accordion_document(buffer, &config.shell(CALENDAR_CSS), &sections)?;
    Ok((records.len(), sections.len()))
}

/// (キー, 値) ペアの複数段テーブル
///
/// キー列の整形は `clean_key` で変換の種類ごとに切り替える。値列は前後の空白を除去する。
fn render_pairs<F>(
    buffer: &mut Vec<u8>,
    table: &SheetTable,
    kind: TransformKind,
    stylesheet: &str,
    columns: usize,
    clean_key: F,
) -> Result<(usize, usize), XlsxToHtmlError>
where
    F: Fn(&CellValue) -> String,
{
    let headers = kind.required_columns();
    let records = table.select(headers)?;

    let pairs: Vec<(String, String)> = records
        .iter()
        .map(|record| (clean_key(record.field(0)), record.field(1).as_trimmed_text()))
        .collect();

    render_pair_table(buffer, stylesheet, (headers[0], headers[1]), &pairs, columns)?;
    Ok((pairs.len(), 1))
}
