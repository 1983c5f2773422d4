//! Embedded Stylesheets
//!
//! 変換の種類ごとにインライン埋め込みするCSS。

/// Bootstrap CSS（表示時にCDNから取得）
pub(crate) const BOOTSTRAP_CSS_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";

/// Bootstrap JSバンドル（アコーディオンの開閉に使用）
pub(crate) const BOOTSTRAP_JS_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js";

/// カレンダー（月ごとのアコーディオン + イベントテーブル）
pub(crate) const CALENDAR_CSS: &str = r#"
        body {
            padding: 2px;
        }

        .custom-accordion-header {
            background-color: #DDDDDD;
            font-weight: 700;
            font-family: Arial, sans-serif;
            font-size: 18px;
            padding: 2px 2px;
            color: #000;
        }

        .custom-accordion-item {
            border: 1px solid #C9C3AD;
            margin-bottom: 3px;
            border-radius: 3px;
            overflow: hidden;
        }

        .custom-accordion-body {
            background-color: #e2e6f1;
            padding: 2px 2px;
            font-family: Arial, sans-serif;
            font-size: 14px;
            color: #000;
        }

        .event-table {
            width: 100%;
            border-collapse: collapse;
            font-family: Arial, sans-serif;
            font-size: 14px;
            table-layout: fixed;
        }

        .event-table th {
            background-color: #C9C3AD;
            padding: 2px;
            text-align: left;
            font-weight: 700;
            border-bottom: 2px solid #999;
        }

        .event-table td {
            padding: 2px 2px;
            vertical-align: top;
        }

        .col-date {
            width: 12%;
        }

        .col-day {
            width: 8%;
        }

        .col-desc {
            width: 80%;
        }

        .even-row {
            background-color: #FFFFFF;
        }

        .odd-row {
            background-color: #F2F2F2;
        }
"#;

/// 社交イベント一覧（1行 = 1アコーディオン項目）
pub(crate) const SOCIAL_CSS: &str = r#"
        body {
            padding: 1px;
        }

        .custom-accordion-header {
            background-color: #dcdcdc;
            font-weight: 700;
            font-family: Arial, sans-serif;
            font-size: 18px;
            padding: 6px 10px;
            color: #000;
        }

        .custom-accordion-item {
            border: 1px solid #bfbfbf;
            margin-bottom: 4px;
            border-radius: 4px;
            overflow: hidden;
        }

        .custom-accordion-body {
            background-color: #eef1f7;
            padding: 10px 10px;
            line-height: 1.1;
            font-family: Arial, sans-serif;
            font-size: 15px;
            color: #000;
        }
"#;

/// 歴代会長一覧（4段のペアグリッド）
pub(crate) const PRESIDENTS_CSS: &str = r#"
  table.pair-grid {
    width: 100%;
    border-collapse: collapse;
    font-family: Arial, sans-serif;
  }

  table.pair-grid th {
    padding: 2px 2px;
    border: 2px solid #fff;
    background-color: #c8c09e;
    color: #000;
    font-weight: bold;
    text-align: left;
    font-size: 16px;
  }

  table.pair-grid td {
    padding: 4px 4px;
    border: 2px solid #fff;
    font-size: 14px;
  }

  table.pair-grid tr.even-row td {
    background-color: #e9e4d0;
    color: #000;
  }

  table.pair-grid tr.odd-row td {
    background-color: #fff;
    color: #000;
  }

  table.pair-grid td:nth-child(even),
  table.pair-grid th:nth-child(even) {
    width: 18%;
  }

  table.pair-grid td:nth-child(odd),
  table.pair-grid th:nth-child(odd) {
    width: 5%;
  }
"#;

/// 役員一覧（1段のペアグリッド）
pub(crate) const OFFICERS_CSS: &str = r#"
  table.pair-grid {
    width: 35%;
    border-collapse: collapse;
    font-family: Arial, sans-serif;
  }

  table.pair-grid th {
    padding: 2px 2px;
    border: 2px solid #fff;
    background-color: #c8c09e;
    color: #000;
    font-weight: bold;
    text-align: left;
    font-size: 19px;
  }

  table.pair-grid td {
    padding: 4px 4px;
    border: 2px solid #fff;
    font-size: 19px;
  }

  table.pair-grid tr.even-row td {
    background-color: #fff;
    color: #000;
  }

  table.pair-grid tr.odd-row td {
    background-color: #c8c09e;
    color: #000;
  }

  table.pair-grid td:nth-child(even),
  table.pair-grid th:nth-child(even) {
    width: 55%;
    font-weight: bold;
  }

  table.pair-grid td:nth-child(odd),
  table.pair-grid th:nth-child(odd) {
    width: 45%;
  }
"#;
