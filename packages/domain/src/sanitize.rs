//! # HTML エスケープ
//!
//! ユーザー入力をメール本文（HTML）に埋め込む前に、
//! HTML で特別な意味を持つ 5 文字を実体参照に置き換える。
//!
//! | 文字 | 置換後 |
//! |------|--------|
//! | `&` | `&amp;` |
//! | `<` | `&lt;` |
//! | `>` | `&gt;` |
//! | `"` | `&quot;` |
//! | `'` | `&#039;` |
//!
//! 元の文字列を 1 回だけ走査して置換するため、置換結果を再走査して
//! 二重にエスケープすることはない。ただしエスケープ済みの文字列を
//! 再度渡すと `&` が再び置換されるので、呼び出し側は 1 回だけ適用すること。
//!
//! ```rust
//! use contact_relay_domain::sanitize::escape_html;
//!
//! assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
//! ```

/// HTML の予約文字をエスケープする
///
/// すべての入力に対して成功する。予約文字を含まない入力はそのまま返る。
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }

    escaped
}
