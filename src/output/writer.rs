//! Output Writer
//!
//! 出力ファイル名の衝突回避と、完成した文書の書き込みを提供する。

use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::XlsxToHtmlError;
use crate::security::validate_output_stem;

/// 既存ファイルと衝突しない出力パスを返す
///
/// `directory/base_name.ext` が存在しなければそれを、存在すれば
/// `base_name_1.ext`, `base_name_2.ext`, … の順に最初の空き名を返します。
/// 拡張子は `".html"` と `"html"` のどちらの形でも指定できます。
///
/// ディレクトリの内容と引数だけで結果が決まり、隠れた状態は持ちません。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxhtml::next_available_path;
///
/// let path = next_available_path("output", "SocialList", ".html");
/// // output/SocialList.html が既にあれば output/SocialList_1.html
/// println!("{}", path.display());
/// ```
pub fn next_available_path<P: AsRef<Path>>(directory: P, base_name: &str, extension: &str) -> PathBuf {
    let directory = directory.as_ref();
    let extension = extension.trim_start_matches('.');
    let file_name = |suffix: Option<u32>| match (suffix, extension.is_empty()) {
        (None, true) => base_name.to_string(),
        (None, false) => format!("{}.{}", base_name, extension),
        (Some(n), true) => format!("{}_{}", base_name, n),
        (Some(n), false) => format!("{}_{}.{}", base_name, n, extension),
    };

    let mut candidate = directory.join(file_name(None));
    let mut counter = 1;
    while candidate.exists() {
        candidate = directory.join(file_name(Some(counter)));
        counter += 1;
    }
    candidate
}

/// 入力ファイル名（またはアップロード元の表示名）から出力名の語幹を取り出す
///
/// `"uploads/Calendar 2025.xlsx"` → `"Calendar 2025"`
pub(crate) fn output_stem(name: &Path) -> Result<String, XlsxToHtmlError> {
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    validate_output_stem(&stem).map_err(XlsxToHtmlError::SecurityViolation)?;
    Ok(stem)
}

/// 文書を衝突しない名前で書き込み、書き込んだパスを返す
///
/// 出力ディレクトリが存在しなければ作成します。既存ファイルは上書きせず、
/// 名前の決定から作成までの間に同名ファイルが作られた場合は次の候補を試します。
pub(crate) fn write_document(
    directory: &Path,
    stem: &str,
    extension: &str,
    contents: &str,
) -> Result<PathBuf, XlsxToHtmlError> {
    validate_output_stem(stem).map_err(XlsxToHtmlError::SecurityViolation)?;
    fs::create_dir_all(directory)?;

    loop {
        let path = next_available_path(directory, stem, extension);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                fill_new_file(file, &path, contents.as_bytes())?;
                info!("wrote {} bytes to {}", contents.len(), path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("{} appeared concurrently, trying next name", path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// 作成したばかりのファイルに内容を書き込む
///
/// 書き込みに失敗した場合はファイルを削除し、途中までの文書を残さない。
fn fill_new_file<W: Write>(
    mut file: W,
    path: &Path,
    contents: &[u8],
) -> Result<(), XlsxToHtmlError> {
    let result = file.write_all(contents).and_then(|()| file.flush());
    drop(file);

    if let Err(e) = result {
        if let Err(remove_err) = fs::remove_file(path) {
            warn!("could not remove partial {}: {}", path.display(), remove_err);
        }
        return Err(e.into());
    }
    Ok(())
}
