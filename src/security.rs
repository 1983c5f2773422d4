//! Security Module
//!
//! 入力ファイルサイズの上限と、出力ファイル名の検証を提供するモジュール。

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 104_857_600, // 100MB
        }
    }
}

/// 出力ファイル名の語幹（拡張子を除いた部分）を検証
///
/// アップロード元のファイル名などをそのまま出力名に使うため、
/// 出力ディレクトリの外に書き込めるような名前を拒否します。
///
/// # 戻り値
///
/// * `Ok(())` - 安全な名前の場合
/// * `Err(String)` - 空、`.` や `..` そのもの、パス区切り文字やNUL文字を含む場合
pub(crate) fn validate_output_stem(stem: &str) -> Result<(), String> {
    if stem.trim().is_empty() {
        return Err("Empty output name is not allowed".to_string());
    }

    // 区切り文字は別途拒否するため、名前全体が `.` か `..` の場合のみ該当する
    if stem == "." || stem == ".." {
        return Err(format!("Path traversal detected: {}", stem));
    }

    if stem.contains('/') || stem.contains('\\') {
        return Err(format!("Path separator in output name is not allowed: {}", stem));
    }

    if stem.contains('\0') {
        return Err("NUL character in output name is not allowed".to_string());
    }

    Ok(())
}
