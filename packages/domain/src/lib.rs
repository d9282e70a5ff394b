//! # Contact Relay ドメイン層
//!
//! お問い合わせフォームの送信内容と、そこから生成される送信メールを表現する。
//!
//! ## モジュール構成
//!
//! - [`contact`] - 送信内容のバリデーション
//! - [`sanitize`] - HTML エスケープ
//! - [`mail`] - 送信メールと送信エラー
//!
//! ## 設計方針
//!
//! - I/O を持たない純粋な関数と型のみを配置する
//! - 「検証済み」「エスケープ済み」を型で区別し、呼び出し順序の誤りをコンパイル時に防ぐ

pub mod contact;
pub mod mail;
pub mod sanitize;

pub use contact::{ContactSubmission, SanitizedContact, ValidatedContact, ValidationError};
pub use mail::{MailError, MessageKind, OutboundMessage};
