//! Formatter Module
//!
//! カレンダーイベントの日付・曜日表示の書式化を提供するモジュール。
//! 日付として解析できない値は、エラーにせず生テキストへフォールバックします。

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::warn;

use crate::parser::excel_serial_to_datetime;
use crate::types::CellValue;

/// 日付として解釈できなかった値の生テキスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawText(pub String);

/// 1イベント分の表示用文字列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DateDisplay {
    /// 日付表示（例: `"January 1"`, `"Sep 3-5"`, `"Sep 29-Oct 2"`）
    pub date: String,

    /// 曜日表示（例: `"Wednesday"`, `"Wed-Fri"`）
    pub day: String,
}

/// 年から始まる日付形式（先頭が4桁の年の場合のみ試す）
const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// 月名を含む日付形式
const NAMED_DATE_FORMATS: &[&str] = &["%B %d, %Y", "%d %B %Y"];

/// 年から始まる日時形式（先頭が4桁の年の場合のみ試す）
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// セル値を日付として解析する
///
/// # 受け付ける値
///
/// - 日付書式付きセル
/// - 数値（Excelの1900年システムのシリアル値として解釈）
/// - 文字列: `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY`, `M/D/YY`,
///   `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, `March 5, 2025`,
///   `Mar 5, 2025`, `5 March 2025`, `March 2025`（月の1日）
///
/// 時刻成分は切り捨て、暦日に正規化します。
///
/// # 戻り値
///
/// * `Ok(NaiveDate)` - 解析に成功した場合
/// * `Err(RawText)` - 解析できなかった場合（元の値の文字列表現）
pub(crate) fn parse_date_or_fallback(raw: &CellValue) -> Result<NaiveDate, RawText> {
    let parsed = match raw {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Number(n) => excel_serial_to_datetime(*n)
            .filter(|_| *n >= 1.0)
            .map(|dt| dt.date()),
        CellValue::String(s) => parse_date_str(s.trim()),
        CellValue::Bool(_) | CellValue::Error(_) | CellValue::Empty => None,
    };

    parsed.ok_or_else(|| RawText(raw.as_text()))
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    // "%Y" は1桁の年も受け付けるため、"9/3/25" が西暦9年と解釈されないよう先頭の桁数で絞る
    let leading_year = s
        .split(['-', '/'])
        .next()
        .is_some_and(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()));

    if leading_year {
        for fmt in ISO_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Some(date);
            }
        }

        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt.date());
            }
        }
    }

    for fmt in NAMED_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // 米国式。年が2桁か4桁かで書式を切り替える（"%Y" は "25" を西暦25年と解釈するため）
    if let Some(year) = s.rsplit('/').next() {
        let fmt = match year.len() {
            4 => Some("%m/%d/%Y"),
            2 => Some("%m/%d/%y"),
            _ => None,
        };
        if let Some(date) = fmt.and_then(|fmt| NaiveDate::parse_from_str(s, fmt).ok()) {
            return Some(date);
        }
    }

    parse_month_label(s)
}

/// `"March 2025"` 形式の文字列を、その月の1日として解析する
pub(crate) fn parse_month_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("1 {}", label.trim()), "%d %B %Y").ok()
}

/// アコーディオンの見出しに使う月ラベル（例: `"March 2025"`）
pub(crate) fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// 開始日と終了日の差（日数）。終了日がない場合は0
pub(crate) fn duration_days(start: NaiveDate, end: Option<NaiveDate>) -> i64 {
    end.map(|end| (end - start).num_days()).unwrap_or(0)
}

/// 終了日セルを解析する。空の場合と解析できない場合は `None`
pub(crate) fn parse_end_date(end: &CellValue) -> Option<NaiveDate> {
    if end.is_empty() {
        return None;
    }

    match parse_date_or_fallback(end) {
        Ok(date) => Some(date),
        Err(RawText(raw)) => {
            warn!("unparseable end date '{}', treating event as single-day", raw);
            None
        }
    }
}

/// 解析済みの日付から表示用文字列を生成
pub(crate) fn format_date_range(start: NaiveDate, end: Option<NaiveDate>) -> DateDisplay {
    let days = duration_days(start, end);

    let end = match end {
        Some(end) if days >= 1 => end,
        _ => {
            return DateDisplay {
                date: format!("{} {}", start.format("%B"), start.day()),
                day: start.format("%A").to_string(),
            }
        }
    };

    let date = if start.month() == end.month() && start.year() == end.year() {
        format!("{} {}-{}", start.format("%b"), start.day(), end.day())
    } else {
        format!(
            "{} {}-{} {}",
            start.format("%b"),
            start.day(),
            end.format("%b"),
            end.day()
        )
    };

    let day = if days <= 7 {
        format!("{}-{}", start.format("%a"), end.format("%a"))
    } else {
        String::new()
    };

    DateDisplay { date, day }
}

/// HTML特殊文字をエスケープ
///
/// `&`, `<`, `>`, `"`, `'` を文字参照に置き換えます。
pub(crate) fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
