//! Grid Module
//!
//! (キー, 値) ペアの列を複数段のグリッドに分割する。

/// ペアを `columns` 段に連続ブロックとして分割する
///
/// 各段の行数は `ceil(total / columns)` で、最後の段は短くなることがあります。
/// 要素数が少ない場合、後ろの段は空になります。戻り値の長さは常に `columns` です。
///
/// 1段目に先頭のブロック、2段目に次のブロック…と詰める（ラウンドロビンではない）ため、
/// 各段を順に連結すると元の並びに戻ります。
///
/// # 戻り値
///
/// `(段ごとのスライス, 行数)`
pub(crate) fn split_into_columns<T>(items: &[T], columns: usize) -> (Vec<&[T]>, usize) {
    if columns == 0 {
        return (Vec::new(), 0);
    }

    let rows = items.len().div_ceil(columns);
    if rows == 0 {
        return (vec![&items[..0]; columns], 0);
    }

    let mut split: Vec<&[T]> = items.chunks(rows).collect();
    split.resize(columns, &items[..0]);
    (split, rows)
}

/// 分割済みの段を行ごとに走査する
///
/// `r` 行目について、各段の `r` 番目の要素（存在しない場合は `None`）を返します。
pub(crate) fn grid_rows<'a, T>(
    columns: &'a [&'a [T]],
    rows: usize,
) -> impl Iterator<Item = Vec<Option<&'a T>>> + 'a {
    (0..rows).map(move |r| columns.iter().map(|col| col.get(r)).collect())
}
