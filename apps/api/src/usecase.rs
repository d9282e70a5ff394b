//! # ユースケース層
//!
//! 問い合わせ送信のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: メール送信を `Arc<dyn MailSender>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `composer`: 送信内容から 2 通のメールを生成する
//! - `contact`: 検証から送信までのフロー全体

pub mod composer;
pub mod contact;

pub use composer::{ComposedMessages, MessageComposer};
pub use contact::{ContactService, DispatchOutcome};
