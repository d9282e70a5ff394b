//! # お問い合わせ送信内容
//!
//! フォームから受け取った `name` / `email` / `message` を表現し、
//! 下流（メール生成・送信）に渡す前のバリデーションを行う。
//!
//! ## 状態の遷移
//!
//! ```text
//! ContactSubmission ──validate()──▶ ValidatedContact ──sanitize()──▶ SanitizedContact
//!   (未検証)                          (検証済み)                       (HTML エスケープ済み)
//! ```
//!
//! `sanitize()` は `ValidatedContact` を消費するため、同じ入力を
//! 2 回エスケープすることは型レベルで起こらない。
//!
//! ## 使用例
//!
//! ```rust
//! use contact_relay_domain::contact::{ContactSubmission, ValidationError};
//!
//! let submission = ContactSubmission {
//!     name:    Some("Jane Doe".to_string()),
//!     email:   Some("jane@example.com".to_string()),
//!     message: Some("Hello <there>".to_string()),
//! };
//! let sanitized = submission.validate()?.sanitize();
//! assert_eq!(sanitized.message(), "Hello &lt;there&gt;");
//! # Ok::<(), ValidationError>(())
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::sanitize::escape_html;

/// メールアドレスの構造チェック用パターン
///
/// `@` と空白を含まない 1 文字以上の並びを `@` と `.` でつないだ形
/// （`local@domain.tld`）のみを確認する。
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("メールアドレスのパターンが不正です")
});

/// バリデーションエラー
///
/// `Display` の文言はそのまま API レスポンスの `error` フィールドに使われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// いずれかのフィールドが未指定、またはトリム後に空
    #[error("All fields are required")]
    MissingField,

    /// メールアドレスが `local@domain.tld` の形になっていない
    #[error("Invalid email format")]
    InvalidEmailFormat,
}

/// フォームから受け取った未検証の送信内容
///
/// JSON 上でフィールドが欠けている場合や `null` の場合は `None` になる。
/// 欠損はデシリアライズエラーではなく [`ValidationError::MissingField`] として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactSubmission {
    pub name:    Option<String>,
    pub email:   Option<String>,
    pub message: Option<String>,
}

impl ContactSubmission {
    /// 送信内容を検証する
    ///
    /// 1. 3 フィールドすべてがトリム後に空でないこと（[`ValidationError::MissingField`]）
    /// 2. `email` が構造チェックを通ること（[`ValidationError::InvalidEmailFormat`]）
    ///
    /// 構造チェックは [`is_structurally_valid_email`] を参照。
    pub fn validate(&self) -> Result<ValidatedContact, ValidationError> {
        let (Some(name), Some(email), Some(message)) = (
            non_blank(self.name.as_deref()),
            non_blank(self.email.as_deref()),
            non_blank(self.message.as_deref()),
        ) else {
            return Err(ValidationError::MissingField);
        };

        if !is_structurally_valid_email(email) {
            return Err(ValidationError::InvalidEmailFormat);
        }

        Ok(ValidatedContact {
            name:    name.to_string(),
            email:   email.to_string(),
            message: message.to_string(),
        })
    }
}

/// Unicode の空白に加え、BOM（U+FEFF）だけの値も空とみなす
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim_matches(is_blank_char).is_empty())
}

fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// メールアドレスの形だけを確認する
///
/// # 制限事項
///
/// RFC 5322 の文法検証ではない。`local@domain.tld` の形をしていれば通し、
/// 引用符付きのローカル部や IP リテラルのドメインは考慮しない。
/// 逆に `a@b` のような TLD のないアドレスは拒否する。
/// 前後の空白はトリムせずに判定するため、空白を含む入力は不正とみなされる。
/// Rust の `\s` は Unicode の `White_Space` のみで BOM（U+FEFF）を含まないため、
/// パターン側で BOM も空白と同様に除外している。
pub fn is_structurally_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// 検証済みの送信内容
///
/// [`ContactSubmission::validate`] からのみ生成される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContact {
    name:    String,
    email:   String,
    message: String,
}

impl ValidatedContact {
    /// 自動返信の宛先（エスケープ前のメールアドレス）
    pub fn email(&self) -> &str {
        &self.email
    }

    /// HTML 本文に埋め込むため、すべてのフィールドをエスケープする
    ///
    /// メールアドレスは宛先としてはそのまま使うが、本文に表示する値は
    /// 名前・本文と同様にエスケープしておく。
    pub fn sanitize(self) -> SanitizedContact {
        SanitizedContact {
            name:          escape_html(&self.name),
            email:         escape_html(&self.email),
            message:       escape_html(&self.message),
            reply_address: self.email,
        }
    }
}

/// HTML エスケープ済みの送信内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContact {
    name:          String,
    email:         String,
    message:       String,
    reply_address: String,
}

impl SanitizedContact {
    /// エスケープ済みの名前
    pub fn name(&self) -> &str {
        &self.name
    }

    /// エスケープ済みのメールアドレス（本文表示用）
    pub fn email(&self) -> &str {
        &self.email
    }

    /// エスケープ済みの本文
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 自動返信の宛先アドレス（エスケープしていない値）
    pub fn reply_address(&self) -> &str {
        &self.reply_address
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn submission(name: Option<&str>, email: Option<&str>, message: Option<&str>) -> ContactSubmission {
        ContactSubmission {
            name:    name.map(str::to_string),
            email:   email.map(str::to_string),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn 正しい入力は検証を通る() {
        let sut = submission(Some("Jane Doe"), Some("jane@example.com"), Some("Hello"));

        let validated = sut.validate().unwrap();

        assert_eq!(validated.email(), "jane@example.com");
    }

    #[rstest]
    #[case::name_欠損(None, Some("jane@example.com"), Some("Hello"))]
    #[case::email_欠損(Some("Jane"), None, Some("Hello"))]
    #[case::message_欠損(Some("Jane"), Some("jane@example.com"), None)]
    #[case::name_空文字(Some(""), Some("jane@example.com"), Some("Hello"))]
    #[case::email_空白のみ(Some("Jane"), Some("   "), Some("Hello"))]
    #[case::message_空文字(Some("Jane"), Some("jane@example.com"), Some(""))]
    #[case::message_空白のみ(Some("Jane"), Some("jane@example.com"), Some("   "))]
    #[case::message_改行とタブのみ(Some("Jane"), Some("jane@example.com"), Some("\n\t "))]
    #[case::message_bomのみ(Some("Jane"), Some("jane@example.com"), Some("\u{feff}"))]
    #[case::name_bomと空白のみ(Some("\u{feff} "), Some("jane@example.com"), Some("Hello"))]
    #[case::すべて欠損(None, None, None)]
    fn 欠損または空白のフィールドはmissing_fieldになる(
        #[case] name: Option<&str>,
        #[case] email: Option<&str>,
        #[case] message: Option<&str>,
    ) {
        let result = submission(name, email, message).validate();

        assert_eq!(result, Err(ValidationError::MissingField));
    }

    #[rstest]
    #[case("no-at-sign")]
    #[case("a@b")]
    #[case("@b.com")]
    #[case("a@.com")]
    #[case("a@b.")]
    #[case("a b@example.com")]
    #[case("a@@example.com")]
    #[case(" jane@example.com")]
    #[case("jane@example.com ")]
    #[case("\u{feff}jane@example.com")]
    fn 形式が不正なメールアドレスはinvalid_email_formatになる(#[case] email: &str) {
        let result = submission(Some("Jane"), Some(email), Some("Hello")).validate();

        assert_eq!(result, Err(ValidationError::InvalidEmailFormat));
    }

    #[rstest]
    #[case("jane@example.com")]
    #[case("first.last+tag@sub.example.co.jp")]
    #[case("a@b.c")]
    fn 構造が正しいメールアドレスは受け付ける(#[case] email: &str) {
        assert!(is_structurally_valid_email(email));
    }

    #[test]
    fn 欠損チェックは形式チェックより先に行われる() {
        let result = submission(Some("Jane"), Some("no-at-sign"), Some("  ")).validate();

        assert_eq!(result, Err(ValidationError::MissingField));
    }

    #[test]
    fn sanitizeはすべての表示用フィールドをエスケープする() {
        let sut = submission(
            Some("<b>Jane</b>"),
            Some("o'neil@example.com"),
            Some("Hello <there> & \"bye\""),
        );

        let sanitized = sut.validate().unwrap().sanitize();

        assert_eq!(sanitized.name(), "&lt;b&gt;Jane&lt;/b&gt;");
        assert_eq!(sanitized.email(), "o&#039;neil@example.com");
        assert_eq!(sanitized.message(), "Hello &lt;there&gt; &amp; &quot;bye&quot;");
        assert_eq!(sanitized.reply_address(), "o'neil@example.com");
    }

    #[test]
    fn 検証は入力をトリムせずに保持する() {
        let sut = submission(Some("  Jane  "), Some("jane@example.com"), Some(" hi "));

        let sanitized = sut.validate().unwrap().sanitize();

        assert_eq!(sanitized.name(), "  Jane  ");
        assert_eq!(sanitized.message(), " hi ");
    }

    #[test]
    fn エラーメッセージがレスポンス文言と一致する() {
        assert_eq!(
            ValidationError::MissingField.to_string(),
            "All fields are required"
        );
        assert_eq!(
            ValidationError::InvalidEmailFormat.to_string(),
            "Invalid email format"
        );
    }
}
