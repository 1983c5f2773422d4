//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::builder::TransformerBuilder;
use crate::error::XlsxToHtmlError;

/// 変換の種類
///
/// 各種類は独立したパイプライン（読み込み → 書式化 → 構築 → 出力）を持ちますが、
/// すべて `transform(入力パス) -> 出力パス` という同じ形で呼び出せます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum TransformKind {
    /// 社交イベント一覧（1行 = 1アコーディオン項目）
    ///
    /// 先頭シートの `Title` / `Description` 列を使用します。
    /// 説明文は前後の空白を除去し、HTMLエスケープしたテキストとして出力します。
    SocialAccordion,

    /// イベントカレンダー（月ごとのアコーディオン + 3列テーブル）
    ///
    /// `Events` シートの `StartDate` / `EndDate` / `Description` 列を使用します。
    CalendarAccordion,

    /// 歴代会長一覧（`Year` / `Name` のペアを4列に分割したテーブル）
    PresidentsTable,

    /// 役員一覧（`Officers` シートの `Name` / `Office` のペアを1列で表示）
    OfficersTable,
}

impl TransformKind {
    /// すべての変換の種類
    pub const ALL: [TransformKind; 4] = [
        TransformKind::SocialAccordion,
        TransformKind::CalendarAccordion,
        TransformKind::PresidentsTable,
        TransformKind::OfficersTable,
    ];

    /// コマンドラインやレポートで使用する識別名
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::SocialAccordion => "social",
            TransformKind::CalendarAccordion => "calendar",
            TransformKind::PresidentsTable => "presidents",
            TransformKind::OfficersTable => "officers",
        }
    }

    /// 画面表示用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            TransformKind::SocialAccordion => "Social Events Accordion",
            TransformKind::CalendarAccordion => "Calendar Accordion",
            TransformKind::PresidentsTable => "Presidents Table",
            TransformKind::OfficersTable => "Officers Table",
        }
    }

    /// 読み込むシートの既定値
    pub fn default_sheet(&self) -> SheetSelector {
        match self {
            TransformKind::CalendarAccordion => SheetSelector::Name("Events".to_string()),
            TransformKind::OfficersTable => SheetSelector::Name("Officers".to_string()),
            TransformKind::SocialAccordion | TransformKind::PresidentsTable => {
                SheetSelector::First
            }
        }
    }

    /// 必須列（ヘッダー名）
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TransformKind::SocialAccordion => &["Title", "Description"],
            TransformKind::CalendarAccordion => &["StartDate", "EndDate", "Description"],
            TransformKind::PresidentsTable => &["Year", "Name"],
            TransformKind::OfficersTable => &["Name", "Office"],
        }
    }

    /// テーブル系の変換で使用する段数の既定値（アコーディオン系は `None`）
    pub fn default_columns(&self) -> Option<usize> {
        match self {
            TransformKind::PresidentsTable => Some(4),
            TransformKind::OfficersTable => Some(1),
            TransformKind::SocialAccordion | TransformKind::CalendarAccordion => None,
        }
    }

    /// 既定の設定で変換し、出力ファイルのパスを返す
    ///
    /// 出力先は `./output` ディレクトリです。設定を変更する場合は
    /// [`TransformerBuilder`] を使用してください。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxhtml::TransformKind;
    ///
    /// # fn main() -> Result<(), xlsxhtml::XlsxToHtmlError> {
    /// let output = TransformKind::CalendarAccordion.transform("calendar.xlsx")?;
    /// println!("{}", output.display());
    /// # Ok(())
    /// # }
    /// ```
    pub fn transform<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf, XlsxToHtmlError> {
        TransformerBuilder::new(*self).build()?.transform(input)
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = XlsxToHtmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        TransformKind::ALL
            .iter()
            .copied()
            .find(|kind| {
                kind.name().eq_ignore_ascii_case(needle) || kind.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| XlsxToHtmlError::Config(format!("Unknown transform kind: '{}'", s)))
    }
}

/// シート選択方式
///
/// 読み込むシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 先頭のシート
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Events".to_string())`
    Name(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip_through_from_str() {
        for kind in TransformKind::ALL {
            assert_eq!(kind.name().parse::<TransformKind>().unwrap(), kind);
            assert_eq!(kind.label().parse::<TransformKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(
            "CALENDAR".parse::<TransformKind>().unwrap(),
            TransformKind::CalendarAccordion
        );
        assert_eq!(
            " social events accordion ".parse::<TransformKind>().unwrap(),
            TransformKind::SocialAccordion
        );
    }

    #[test]
    fn test_from_str_unknown() {
        match "inventory".parse::<TransformKind>() {
            Err(XlsxToHtmlError::Config(msg)) => assert!(msg.contains("inventory")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_sheets() {
        assert_eq!(
            TransformKind::CalendarAccordion.default_sheet(),
            SheetSelector::Name("Events".to_string())
        );
        assert_eq!(
            TransformKind::OfficersTable.default_sheet(),
            SheetSelector::Name("Officers".to_string())
        );
        assert_eq!(TransformKind::SocialAccordion.default_sheet(), SheetSelector::First);
        assert_eq!(TransformKind::PresidentsTable.default_sheet(), SheetSelector::First);
    }

    #[test]
    fn test_default_columns() {
        assert_eq!(TransformKind::PresidentsTable.default_columns(), Some(4));
        assert_eq!(TransformKind::OfficersTable.default_columns(), Some(1));
        assert_eq!(TransformKind::CalendarAccordion.default_columns(), None);
    }

    #[test]
    fn test_serialize_kind() {
        let json = serde_json::to_string(&TransformKind::PresidentsTable).unwrap();
        assert_eq!(json, "\"presidents-table\"");
    }
}
