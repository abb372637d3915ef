//! 入力値検証ヘルパー
//!
//! 副作用を持たない純粋な事前条件チェック

use url::Url;

use crate::error::{ModelError, ModelResult};

/// 空文字列または空白のみかどうか
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// URLとして構文的に有効か検証する
///
/// スキームを含む絶対URLのみ有効とみなす。前後の空白は無視する。
pub fn is_valid_url(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && Url::parse(value).is_ok()
}

/// 空白でない文字列であることを要求する
///
/// 空白の場合は `message` を持つ `InvalidArgument` を返す。
pub fn require_non_blank(value: &str, message: &str) -> ModelResult<()> {
    if is_blank(value) {
        return Err(ModelError::invalid_argument(message));
    }
    Ok(())
}

/// 有効なURLであることを要求する
pub fn require_valid_url(value: &str) -> ModelResult<()> {
    if !is_valid_url(value) {
        return Err(ModelError::invalid_argument(format!(
            "{} is not a valid URL.",
            value
        )));
    }
    Ok(())
}

/// 0以上の整数であることを要求し、符号なし整数に変換する
pub fn require_non_negative(value: i64, message: &str) -> ModelResult<u64> {
    u64::try_from(value).map_err(|_| ModelError::invalid_argument(message))
}
