//! # Contact Relay インフラ層
//!
//! 外部サービスとの接続を担当する。
//!
//! ## モジュール構成
//!
//! - [`mail`] - メール送信サービス（SMTP / Noop）との接続
//! - `mock` - テスト用のインメモリ送信（`test-utils` feature）

pub mod mail;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use mail::{MailSender, NoopMailSender, SmtpCredentials, SmtpMailSender};
