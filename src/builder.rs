//! Builder Module
//!
//! Fluent Builder APIを提供し、`Transformer`インスタンスを段階的に構築する。

use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::api::{SheetSelector, TransformKind};
use crate::error::XlsxToHtmlError;
use crate::output::{output_stem, write_document, DocumentShell};
use crate::parser::WorkbookParser;
use crate::pipeline::{self, Rendered};
use crate::security::SecurityConfig;

/// 出力ディレクトリの既定値
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// アコーディオンコンテナidの既定値
pub const DEFAULT_ACCORDION_ID: &str = "accordionMaster";

/// 文書タイトルの既定値
pub const DEFAULT_TITLE: &str = "Accordion Output";

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct TransformConfig {
    /// シート選択（`None` の場合は変換の種類の既定値）
    pub sheet: Option<SheetSelector>,

    /// テーブル系の段数（`None` の場合は変換の種類の既定値）
    pub columns: Option<usize>,

    /// 出力ディレクトリ
    pub output_dir: PathBuf,

    /// アコーディオンコンテナのid
    pub accordion_id: String,

    /// 文書タイトル
    pub title: String,

    /// 入力サイズの上限
    pub security: SecurityConfig,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            sheet: None,
            columns: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            accordion_id: DEFAULT_ACCORDION_ID.to_string(),
            title: DEFAULT_TITLE.to_string(),
            security: SecurityConfig::default(),
        }
    }
}

impl TransformConfig {
    /// アコーディオン文書の外枠設定
    pub fn shell<'a>(&'a self, stylesheet: &'a str) -> DocumentShell<'a> {
        DocumentShell {
            title: &self.title,
            accordion_id: &self.accordion_id,
            stylesheet,
        }
    }
}

/// 1回の変換結果
///
/// `--json` 出力などで使用するため、`serde::Serialize` を実装しています。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    /// 変換の種類
    pub kind: TransformKind,

    /// 入力ファイル
    pub input: PathBuf,

    /// 書き込んだ出力ファイル
    pub output: PathBuf,

    /// 読み込んだシート名
    pub sheet: String,

    /// 出力したレコード数
    pub records: usize,

    /// アコーディオン項目数（テーブル系は1）
    pub sections: usize,
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxhtml::{TransformKind, TransformerBuilder};
///
/// # fn main() -> Result<(), xlsxhtml::XlsxToHtmlError> {
/// let transformer = TransformerBuilder::new(TransformKind::CalendarAccordion)
///     .with_output_dir("public/fragments")
///     .build()?;
/// let output = transformer.transform("calendar.xlsx")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TransformerBuilder {
    kind: TransformKind,
    config: TransformConfig,
}

impl TransformerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート: 変換の種類ごとの既定値（`Events`, `Officers`, または先頭シート）
    /// - 段数: 会長一覧は4、役員一覧は1
    /// - 出力ディレクトリ: `output`
    /// - アコーディオンid: `accordionMaster`
    /// - 文書タイトル: `Accordion Output`
    /// - 入力サイズ上限: 100MB
    pub fn new(kind: TransformKind) -> Self {
        Self {
            kind,
            config: TransformConfig::default(),
        }
    }

    /// 出力ディレクトリを指定する（存在しない場合は書き込み時に作成）
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// 読み込むシートを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxhtml::{SheetSelector, TransformKind, TransformerBuilder};
    ///
    /// let builder = TransformerBuilder::new(TransformKind::CalendarAccordion)
    ///     .with_sheet_selector(SheetSelector::Name("Events 2026".to_string()));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet = Some(selector);
        self
    }

    /// テーブル系の変換で使用する段数を指定する
    ///
    /// アコーディオン系の変換に指定した場合、`build()` がエラーを返します。
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.config.columns = Some(columns);
        self
    }

    /// アコーディオンコンテナのidを指定する
    pub fn with_accordion_id<S: Into<String>>(mut self, id: S) -> Self {
        self.config.accordion_id = id.into();
        self
    }

    /// 文書タイトル（`<title>`）を指定する
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.config.title = title.into();
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Transformer`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxToHtmlError::Config(String)`: 設定の検証に失敗した場合
    ///   * 段数が0、またはアコーディオン系の変換に段数を指定した
    ///   * アコーディオンidが空、または空白・引用符・`#` を含む
    ///   * 文書タイトルが空
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Transformer, XlsxToHtmlError> {
        // 1. 段数の検証
        if let Some(columns) = self.config.columns {
            if self.kind.default_columns().is_none() {
                return Err(XlsxToHtmlError::Config(format!(
                    "Column count is only supported for table transforms, not '{}'",
                    self.kind
                )));
            }
            if columns == 0 {
                return Err(XlsxToHtmlError::Config(
                    "Column count must be at least 1".to_string(),
                ));
            }
        }

        // 2. アコーディオンidの検証（属性値とCSSセレクタの両方で使われる）
        let id = &self.config.accordion_id;
        if id.is_empty()
            || id
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '#' | '<' | '>' | '&'))
        {
            return Err(XlsxToHtmlError::Config(format!(
                "Invalid accordion id: '{}'",
                id
            )));
        }

        // 3. タイトル・入力上限の検証
        if self.config.title.trim().is_empty() {
            return Err(XlsxToHtmlError::Config(
                "Document title must not be empty".to_string(),
            ));
        }
        if self.config.security.max_input_file_size == 0 {
            return Err(XlsxToHtmlError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Transformer {
            kind: self.kind,
            config: self.config,
        })
    }
}

/// 変換処理のファサード
///
/// 入力スプレッドシートを読み込み、変換の種類に応じたHTMLを生成して書き込みます。
/// どの変換の種類でも `transform(入力パス) -> 出力パス` の形で呼び出せます。
#[derive(Debug)]
pub struct Transformer {
    kind: TransformKind,
    config: TransformConfig,
}

impl Transformer {
    /// 変換の種類
    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    /// 出力ディレクトリ
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// 入力ファイルを変換し、出力ファイルのパスを返す
    ///
    /// 出力ファイル名は入力ファイル名の拡張子を `.html` に置き換えたものです。
    /// 同名のファイルが既に存在する場合は `_1`, `_2`, … を付加します。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxhtml::{TransformKind, TransformerBuilder};
    ///
    /// # fn main() -> Result<(), xlsxhtml::XlsxToHtmlError> {
    /// let transformer = TransformerBuilder::new(TransformKind::OfficersTable).build()?;
    /// let path = transformer.transform("Officers.xlsx")?;
    /// assert!(path.ends_with("Officers.html"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn transform<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf, XlsxToHtmlError> {
        Ok(self.transform_with_report(input, None)?.output)
    }

    /// 出力ファイル名を入力パスではなく表示名（アップロード元のファイル名など）から決めて変換する
    ///
    /// 一時ファイルとして保存されたアップロードを変換する場合に使用します。
    pub fn transform_named<P: AsRef<Path>>(
        &self,
        input: P,
        display_name: &str,
    ) -> Result<PathBuf, XlsxToHtmlError> {
        Ok(self.transform_with_report(input, Some(display_name))?.output)
    }

    /// 変換して、出力パスと集計を含むレポートを返す
    ///
    /// # 処理フロー
    ///
    /// 1. 出力名の語幹を決定・検証
    /// 2. 入力を読み込み、シートを選択
    /// 3. 書式化・グループ化してHTMLをメモリ上に生成
    /// 4. 衝突しない名前で書き込み
    ///
    /// 途中でエラーになった場合、出力ファイルは作成されません。
    pub fn transform_with_report<P: AsRef<Path>>(
        &self,
        input: P,
        display_name: Option<&str>,
    ) -> Result<TransformReport, XlsxToHtmlError> {
        let input = input.as_ref();
        let stem = output_stem(display_name.map(Path::new).unwrap_or(input))?;

        let file = File::open(input)?;
        let (sheet, rendered) = self.render_reader(file)?;

        let output = write_document(&self.config.output_dir, &stem, ".html", &rendered.html)?;
        info!(
            "{}: {} -> {} ({} records)",
            self.kind,
            input.display(),
            output.display(),
            rendered.records
        );

        Ok(TransformReport {
            kind: self.kind,
            input: input.to_path_buf(),
            output,
            sheet,
            records: rendered.records,
            sections: rendered.sections,
        })
    }

    /// スプレッドシートを読み込み、HTML文字列を返す（ファイルには書き込まない）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsxhtml::{TransformKind, TransformerBuilder};
    ///
    /// # fn main() -> Result<(), xlsxhtml::XlsxToHtmlError> {
    /// let transformer = TransformerBuilder::new(TransformKind::SocialAccordion).build()?;
    /// let html = transformer.render_to_string(File::open("social.xlsx")?)?;
    /// println!("{}", html);
    /// # Ok(())
    /// # }
    /// ```
    pub fn render_to_string<R: Read>(&self, input: R) -> Result<String, XlsxToHtmlError> {
        Ok(self.render_reader(input)?.1.html)
    }

    fn render_reader<R: Read>(&self, input: R) -> Result<(String, Rendered), XlsxToHtmlError> {
        let mut parser = WorkbookParser::open(input, &self.config.security)?;

        let selector = self
            .config
            .sheet
            .clone()
            .unwrap_or_else(|| self.kind.default_sheet());
        let sheet = parser.resolve_sheet(&selector)?;
        debug!("{}: reading sheet '{}'", self.kind, sheet);

        let table = parser.read_table(&sheet)?;
        let rendered = pipeline::render(self.kind, &table, &self.config)?;
        Ok((sheet, rendered))
    }
}
