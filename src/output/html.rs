//! HTML Builders
//!
//! イベントテーブル、ペアグリッド、アコーディオン項目、文書全体の出力を提供する。
//! セル由来のテキストはすべて `escape_html` を通してから埋め込む。

use std::io::Write;

use super::styles::{BOOTSTRAP_CSS_URL, BOOTSTRAP_JS_URL};
use crate::calendar::CalendarEvent;
use crate::error::XlsxToHtmlError;
use crate::formatter::escape_html;
use crate::grid::{grid_rows, split_into_columns};

/// アコーディオン項目の本文
#[derive(Debug, Clone, Copy)]
pub(crate) enum SectionBody<'a> {
    /// プレーンテキスト（前後の空白を除去してエスケープ）
    Text(&'a str),

    /// 日付・曜日・説明の3列テーブル
    Events(&'a [CalendarEvent]),
}

/// アコーディオン項目1つ分
#[derive(Debug, Clone, Copy)]
pub(crate) struct AccordionSection<'a> {
    pub title: &'a str,
    pub body: SectionBody<'a>,
}

/// アコーディオン文書の外枠（head / body）の設定
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentShell<'a> {
    /// `<title>` に入る文書タイトル
    pub title: &'a str,

    /// アコーディオンコンテナのid（各項目の `data-bs-parent` が参照する）
    pub accordion_id: &'a str,

    /// インライン埋め込みするCSS
    pub stylesheet: &'a str,
}

/// 偶数行・奇数行のクラス名（0始まりの行番号で判定）
pub(crate) fn row_class(index: usize) -> &'static str {
    if index % 2 == 0 {
        "even-row"
    } else {
        "odd-row"
    }
}

/// 3列（Date / Day / Description）のイベントテーブルを出力
pub(crate) fn render_event_table<W: Write>(
    writer: &mut W,
    events: &[CalendarEvent],
) -> Result<(), XlsxToHtmlError> {
    writeln!(writer, r#"<table class="event-table">"#)?;
    writeln!(writer, "  <thead>")?;
    writeln!(writer, "    <tr>")?;
    writeln!(writer, r#"      <th class="col-date">Date</th>"#)?;
    writeln!(writer, r#"      <th class="col-day">Day</th>"#)?;
    writeln!(writer, r#"      <th class="col-desc">Description</th>"#)?;
    writeln!(writer, "    </tr>")?;
    writeln!(writer, "  </thead>")?;
    writeln!(writer, "  <tbody>")?;

    for (i, event) in events.iter().enumerate() {
        writeln!(writer, r#"    <tr class="{}">"#, row_class(i))?;
        writeln!(
            writer,
            r#"      <td class="col-date">{}</td>"#,
            escape_html(&event.display.date)
        )?;
        writeln!(
            writer,
            r#"      <td class="col-day">{}</td>"#,
            escape_html(&event.display.day)
        )?;
        writeln!(
            writer,
            r#"      <td class="col-desc">{}</td>"#,
            escape_html(&event.description)
        )?;
        writeln!(writer, "    </tr>")?;
    }

    writeln!(writer, "  </tbody>")?;
    writeln!(writer, "</table>")?;
    Ok(())
}

/// アコーディオン項目を1つ出力
///
/// 見出しのidは `heading{index}`、折りたたみ領域のidは `collapse{index}`（1始まり）。
pub(crate) fn render_accordion_item<W: Write>(
    writer: &mut W,
    section: &AccordionSection<'_>,
    index: usize,
    accordion_id: &str,
) -> Result<(), XlsxToHtmlError> {
    let collapse_id = format!("collapse{}", index);
    let heading_id = format!("heading{}", index);

    writeln!(writer, r#"<div class="accordion-item custom-accordion-item">"#)?;
    writeln!(
        writer,
        r#"  <h2 class="accordion-header" id="{}">"#,
        heading_id
    )?;
    writeln!(
        writer,
        r##"    <button class="accordion-button custom-accordion-header collapsed" type="button" data-bs-toggle="collapse" data-bs-target="#{0}" aria-expanded="false" aria-controls="{0}">"##,
        collapse_id
    )?;
    writeln!(writer, "      {}", escape_html(section.title))?;
    writeln!(writer, "    </button>")?;
    writeln!(writer, "  </h2>")?;
    writeln!(
        writer,
        r##"  <div id="{}" class="accordion-collapse collapse" aria-labelledby="{}" data-bs-parent="#{}">"##,
        collapse_id,
        heading_id,
        escape_html(accordion_id)
    )?;
    writeln!(writer, r#"    <div class="accordion-body custom-accordion-body">"#)?;

    match section.body {
        SectionBody::Text(text) => writeln!(writer, "{}", escape_html(text.trim()))?,
        SectionBody::Events(events) => render_event_table(writer, events)?,
    }

    writeln!(writer, "    </div>")?;
    writeln!(writer, "  </div>")?;
    writeln!(writer, "</div>")?;
    Ok(())
}

/// アコーディオン項目を文書の外枠で包んで出力
pub(crate) fn render_accordion_document<W: Write>(
    writer: &mut W,
    shell: &DocumentShell<'_>,
    sections: &[AccordionSection<'_>],
) -> Result<(), XlsxToHtmlError> {
    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, r#"<meta charset="UTF-8">"#)?;
    writeln!(writer, "<title>{}</title>", escape_html(shell.title))?;
    writeln!(
        writer,
        r#"<link href="{}" rel="stylesheet">"#,
        BOOTSTRAP_CSS_URL
    )?;
    writeln!(writer, "<style>{}</style>", shell.stylesheet)?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(
        writer,
        r#"<div class="accordion" id="{}">"#,
        escape_html(shell.accordion_id)
    )?;

    for (idx, section) in sections.iter().enumerate() {
        render_accordion_item(writer, section, idx + 1, shell.accordion_id)?;
    }

    writeln!(writer, "</div>")?;
    writeln!(writer, r#"<script src="{}"></script>"#, BOOTSTRAP_JS_URL)?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;
    Ok(())
}

/// (キー, 値) ペアを `columns` 段のグリッドテーブルとして出力
///
/// 見出し行は `headers` を段数分繰り返します。
/// データ行にはイベントテーブルと同じく `even-row` / `odd-row` を付けます。
/// 段に該当する行がない場合は空のセルを2つ出力します。
pub(crate) fn render_pair_table<W: Write>(
    writer: &mut W,
    stylesheet: &str,
    headers: (&str, &str),
    pairs: &[(String, String)],
    columns: usize,
) -> Result<(), XlsxToHtmlError> {
    let (split, rows) = split_into_columns(pairs, columns);

    writeln!(writer, "<style>{}</style>", stylesheet)?;
    writeln!(writer)?;
    writeln!(writer, r#"<table class="pair-grid">"#)?;

    write!(writer, "  <tr>")?;
    for _ in 0..columns {
        write!(
            writer,
            "<th>{}</th><th>{}</th>",
            escape_html(headers.0),
            escape_html(headers.1)
        )?;
    }
    writeln!(writer, "</tr>")?;

    for (r, row) in grid_rows(&split, rows).enumerate() {
        write!(writer, r#"  <tr class="{}">"#, row_class(r))?;
        for cell in row {
            match cell {
                Some((key, value)) => write!(
                    writer,
                    "<td>{}</td><td>{}</td>",
                    escape_html(key),
                    escape_html(value)
                )?,
                None => write!(writer, "<td></td><td></td>")?,
            }
        }
        writeln!(writer, "</tr>")?;
    }

    writeln!(writer, "</table>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::DateDisplay;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), XlsxToHtmlError>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn sample_event(date: &str, day: &str, description: &str) -> CalendarEvent {
        CalendarEvent {
            start: None,
            duration: 0,
            display: DateDisplay {
                date: date.to_string(),
                day: day.to_string(),
            },
            description: description.to_string(),
        }
    }

    #[test]
    fn test_row_class_alternates() {
        assert_eq!(row_class(0), "even-row");
        assert_eq!(row_class(1), "odd-row");
        assert_eq!(row_class(2), "even-row");
    }

    #[test]
    fn test_render_event_table() {
        let events = vec![
            sample_event("Sep 3-5", "Wed-Fri", "Conference"),
            sample_event("September 10", "Wednesday", "Board <meeting>"),
        ];
        let html = render(|w| render_event_table(w, &events));

        assert!(html.contains(r#"<th class="col-date">Date</th>"#));
        assert!(html.contains(r#"<th class="col-day">Day</th>"#));
        assert!(html.contains(r#"<th class="col-desc">Description</th>"#));
        assert!(html.contains(r#"<tr class="even-row">"#));
        assert!(html.contains(r#"<tr class="odd-row">"#));
        assert!(html.contains(r#"<td class="col-date">Sep 3-5</td>"#));
        assert!(html.contains(r#"<td class="col-day">Wed-Fri</td>"#));
        assert!(html.contains("Board &lt;meeting&gt;"));

        let even = html.find("even-row").unwrap();
        let odd = html.find("odd-row").unwrap();
        assert!(even < odd);
    }

    #[test]
    fn test_render_accordion_item_ids() {
        let section = AccordionSection {
            title: "March 2025",
            body: SectionBody::Text("  Hello & welcome  "),
        };
        let html = render(|w| render_accordion_item(w, &section, 3, "accordionMaster"));

        assert!(html.contains(r#"id="heading3""#));
        assert!(html.contains(r#"id="collapse3""#));
        assert!(html.contains(r##"data-bs-target="#collapse3""##));
        assert!(html.contains(r#"aria-controls="collapse3""#));
        assert!(html.contains(r#"aria-labelledby="heading3""#));
        assert!(html.contains(r##"data-bs-parent="#accordionMaster""##));
        assert!(html.contains("March 2025"));
        assert!(html.contains("\nHello &amp; welcome\n"));
    }

    #[test]
    fn test_render_accordion_document_numbers_sections_from_one() {
        let sections = [
            AccordionSection {
                title: "First",
                body: SectionBody::Text("a"),
            },
            AccordionSection {
                title: "Second",
                body: SectionBody::Text("b"),
            },
        ];
        let shell = DocumentShell {
            title: "Accordion Output",
            accordion_id: "accordionMaster",
            stylesheet: ".x { color: red; }",
        };
        let html = render(|w| render_accordion_document(w, &shell, &sections));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Accordion Output</title>"));
        assert!(html.contains(BOOTSTRAP_CSS_URL));
        assert!(html.contains(BOOTSTRAP_JS_URL));
        assert!(html.contains(".x { color: red; }"));
        assert!(html.contains(r#"<div class="accordion" id="accordionMaster">"#));
        assert!(html.contains(r#"id="heading1""#));
        assert!(html.contains(r#"id="heading2""#));
        assert!(!html.contains(r#"id="heading0""#));
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_render_pair_table_grid() {
        let pairs: Vec<(String, String)> = (1..=5)
            .map(|i| (format!("{}", 1900 + i), format!("Name{}", i)))
            .collect();
        let html = render(|w| render_pair_table(w, "", ("Year", "Name"), &pairs, 2));

        assert_eq!(html.matches("<th>Year</th><th>Name</th>").count(), 2);
        // 3行: (1901, 1904), (1902, 1905), (1903, 空)
        assert!(html.contains(
            r#"<tr class="even-row"><td>1901</td><td>Name1</td><td>1904</td><td>Name4</td></tr>"#
        ));
        assert!(html.contains(
            r#"<tr class="odd-row"><td>1902</td><td>Name2</td><td>1905</td><td>Name5</td></tr>"#
        ));
        assert!(html.contains(
            r#"<tr class="even-row"><td>1903</td><td>Name3</td><td></td><td></td></tr>"#
        ));
    }

    #[test]
    fn test_render_pair_table_row_classes() {
        let pairs: Vec<(String, String)> = (0..3)
            .map(|i| (format!("{}", 1990 + i), format!("N{}", i)))
            .collect();
        let html = render(|w| render_pair_table(w, "", ("Year", "Name"), &pairs, 1));

        // 見出し行にはクラスを付けない
        assert!(html.contains("  <tr><th>Year</th><th>Name</th></tr>"));
        let even = html.find(r#"<tr class="even-row"><td>1990</td>"#).unwrap();
        let odd = html.find(r#"<tr class="odd-row"><td>1991</td>"#).unwrap();
        let even_again = html.find(r#"<tr class="even-row"><td>1992</td>"#).unwrap();
        assert!(even < odd && odd < even_again);
    }

    #[test]
    fn test_render_pair_table_escapes_values() {
        let pairs = vec![("<i>Jo</i>".to_string(), "A & B".to_string())];
        let html = render(|w| render_pair_table(w, "", ("Name", "Office"), &pairs, 1));
        assert!(html.contains("<td>&lt;i&gt;Jo&lt;/i&gt;</td><td>A &amp; B</td>"));
    }
}
