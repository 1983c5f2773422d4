//! Calendar Module
//!
//! カレンダーイベントを月ごとのグループに分け、グループ内とグループ間を並べ替える。

use chrono::NaiveDate;
use log::warn;
use std::collections::BTreeMap;

use crate::formatter::{
    duration_days, format_date_range, month_label, parse_date_or_fallback, parse_end_date,
    parse_month_label, DateDisplay, RawText,
};
use crate::types::CellValue;

/// 開始日が空のイベントを集めるグループの見出し
pub(crate) const UNTITLED_GROUP: &str = "Untitled";

/// 書式化済みのイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CalendarEvent {
    /// 解析済みの開始日（空または解析不能の場合は `None`）
    pub start: Option<NaiveDate>,

    /// 期間（日数）。終了日がない場合は0
    pub duration: i64,

    /// 日付・曜日の表示用文字列
    pub display: DateDisplay,

    /// 説明文
    pub description: String,
}

impl CalendarEvent {
    /// 開始日・終了日・説明文からイベントを生成し、所属グループの見出しも返す
    ///
    /// | 条件 | 見出し | 日付表示 | 曜日表示 |
    /// |------|--------|----------|----------|
    /// | 開始日が空 | `"Untitled"` | `""` | `""` |
    /// | 開始日が解析不能 | 生テキスト | 生テキスト | `""` |
    /// | 終了日なし、または期間が0日以下 | `"January 2025"` | `"January 1"` | `"Wednesday"` |
    /// | 同じ月の複数日 | `"September 2025"` | `"Sep 3-5"` | 7日以内なら `"Wed-Fri"`、それ以外は `""` |
    /// | 月をまたぐ複数日 | `"September 2025"` | `"Sep 29-Oct 2"` | 同上 |
    ///
    /// 解析できない終了日は、終了日なしとして扱います。
    pub fn from_cells(start: &CellValue, end: &CellValue, description: &CellValue) -> (String, Self) {
        let description = description.as_text();

        if start.is_empty() {
            let event = Self {
                start: None,
                duration: 0,
                display: DateDisplay::default(),
                description,
            };
            return (UNTITLED_GROUP.to_string(), event);
        }

        match parse_date_or_fallback(start) {
            Ok(start_date) => {
                let end_date = parse_end_date(end);
                let event = Self {
                    start: Some(start_date),
                    duration: duration_days(start_date, end_date),
                    display: format_date_range(start_date, end_date),
                    description,
                };
                (month_label(start_date), event)
            }
            Err(RawText(raw)) => {
                warn!("unparseable start date '{}', grouping under raw text", raw);
                let event = Self {
                    start: None,
                    duration: 0,
                    display: DateDisplay {
                        date: raw.clone(),
                        day: String::new(),
                    },
                    description,
                };
                (raw, event)
            }
        }
    }

    /// グループ内の並べ替えキー
    ///
    /// 開始日の昇順（解析不能は末尾）、同日なら期間の短い順。
    fn sort_key(&self) -> (bool, NaiveDate, i64) {
        match self.start {
            Some(start) => (false, start, self.duration),
            None => (true, NaiveDate::MAX, i64::MAX),
        }
    }
}

/// 同じ見出しを持つイベントの集まり（1アコーディオン項目に対応）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EventGroup {
    pub label: String,
    pub events: Vec<CalendarEvent>,
}

/// イベントを見出しごとにグループ化し、並べ替える
///
/// # 並び順
///
/// * グループ内: 開始日の昇順、同日なら期間の昇順（解析不能な開始日は末尾、入力順を維持）
/// * グループ間: 見出しを `"{月名} {年}"` として解析した日付の昇順。
///   解析できない見出し（`"Untitled"` など）は末尾に見出し文字列の順で並ぶ
pub(crate) fn group_events<I>(events: I) -> Vec<EventGroup>
where
    I: IntoIterator<Item = (String, CalendarEvent)>,
{
    let mut buckets: BTreeMap<String, Vec<CalendarEvent>> = BTreeMap::new();
    for (label, event) in events {
        buckets.entry(label).or_default().push(event);
    }

    let mut groups: Vec<EventGroup> = buckets
        .into_iter()
        .map(|(label, mut events)| {
            events.sort_by_key(CalendarEvent::sort_key);
            EventGroup { label, events }
        })
        .collect();

    groups.sort_by_cached_key(|group| {
        let month = parse_month_label(&group.label);
        (month.is_none(), month, group.label.clone())
    });

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    fn event(start: &str, end: &str, desc: &str) -> (String, CalendarEvent) {
        let end = if end.is_empty() {
            CellValue::Empty
        } else {
            text(end)
        };
        let start = if start.is_empty() {
            CellValue::Empty
        } else {
            text(start)
        };
        CalendarEvent::from_cells(&start, &end, &text(desc))
    }

    fn descriptions(group: &EventGroup) -> Vec<&str> {
        group.events.iter().map(|e| e.description.as_str()).collect()
    }

    #[test]
    fn test_from_cells_month_label() {
        let (label, ev) = event("2025-03-17", "2025-03-18", "Retreat");
        assert_eq!(label, "March 2025");
        assert_eq!(ev.duration, 1);
        assert_eq!(ev.display.date, "Mar 17-18");
        assert_eq!(ev.display.day, "Mon-Tue");
    }

    #[test]
    fn test_from_cells_missing_start_is_untitled() {
        let (label, ev) = event("", "2025-03-18", "Someday");
        assert_eq!(label, UNTITLED_GROUP);
        assert_eq!(ev.display, DateDisplay::default());
        assert_eq!(ev.start, None);
    }

    #[test]
    fn test_from_cells_unparseable_start_groups_under_raw_text() {
        let (label, ev) = event("TBD", "", "Picnic");
        assert_eq!(label, "TBD");
        assert_eq!(ev.display.date, "TBD");
        assert_eq!(ev.display.day, "");
    }

    #[test]
    fn test_within_group_order_by_start_then_duration() {
        let groups = group_events(vec![
            event("2025-09-10", "", "late"),
            event("2025-09-03", "2025-09-06", "long"),
            event("2025-09-03", "", "single"),
            event("2025-09-03", "2025-09-04", "short"),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "September 2025");
        assert_eq!(descriptions(&groups[0]), vec!["single", "short", "long", "late"]);
    }

    #[test]
    fn test_groups_are_chronological_with_non_dates_last() {
        let groups = group_events(vec![
            event("", "", "no date"),
            event("2026-01-05", "", "next year"),
            event("soon", "", "raw"),
            event("2025-12-01", "", "december"),
            event("2025-02-14", "", "february"),
        ]);

        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "February 2025",
                "December 2025",
                "January 2026",
                "Untitled",
                "soon"
            ]
        );
    }

    #[test]
    fn test_untitled_group_keeps_input_order() {
        let groups = group_events(vec![
            event("", "", "first"),
            event("", "", "second"),
            event("", "", "third"),
        ]);
        assert_eq!(descriptions(&groups[0]), vec!["first", "second", "third"]);
    }

    proptest! {
        #[test]
        fn prop_grouping_partitions_and_orders(
            days in proptest::collection::vec((0i64..730, proptest::option::of(-3i64..12)), 0..60)
        ) {
            let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let input: Vec<(String, CalendarEvent)> = days
                .iter()
                .enumerate()
                .map(|(i, (offset, len))| {
                    let start = base + chrono::Duration::days(*offset);
                    let end = len
                        .map(|l| CellValue::String((start + chrono::Duration::days(l)).to_string()))
                        .unwrap_or(CellValue::Empty);
                    CalendarEvent::from_cells(
                        &CellValue::String(start.to_string()),
                        &end,
                        &CellValue::String(format!("event-{i}")),
                    )
                })
                .collect();

            let groups = group_events(input);

            // 全イベントがちょうど1回ずつ現れる
            let mut seen: Vec<String> = groups
                .iter()
                .flat_map(|g| g.events.iter().map(|e| e.description.clone()))
                .collect();
            seen.sort();
            let mut expected: Vec<String> = (0..days.len()).map(|i| format!("event-{i}")).collect();
            expected.sort();
            prop_assert_eq!(seen, expected);

            for group in &groups {
                for ev in &group.events {
                    prop_assert_eq!(month_label(ev.start.unwrap()), group.label.clone());
                }
                for pair in group.events.windows(2) {
                    prop_assert!(pair[0].sort_key() <= pair[1].sort_key());
                }
            }

            for pair in groups.windows(2) {
                prop_assert!(parse_month_label(&pair[0].label) < parse_month_label(&pair[1].label));
            }
        }
    }
}
