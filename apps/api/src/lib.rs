//! # Contact Relay API サーバー
//!
//! ポートフォリオサイトの問い合わせフォームを受け付け、メールで中継する HTTP サービス。
//!
//! ## 処理の流れ
//!
//! ```text
//! ┌─────────────┐  POST /api/contact  ┌──────────────────┐      ┌──────────────┐
//! │   Browser   │────────────────────▶│  Contact Relay   │─────▶│ SMTP リレー   │
//! │ (Portfolio) │◀────────────────────│   (port 3001)    │      │ (Gmail 等)    │
//! └─────────────┘     JSON 応答        └──────────────────┘      └──────────────┘
//! ```
//!
//! 1 件の問い合わせにつき、サイト所有者への通知メールと送信者への自動返信の
//! 2 通を送信する。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - 送信実装・State・ルーターの組み立て
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - オリジン制限と CORS
//! - [`usecase`] - 検証から送信までのビジネスロジック
//!
//! ## 依存関係
//!
//! - `contact_relay_domain`: 入力検証、エスケープ、メッセージ型
//! - `contact_relay_infra`: メール送信（SMTP / Noop）
//! - `contact_relay_shared`: トレーシング初期化、ヘルスチェック型
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use contact_relay::{app_builder, config::AppConfig};
//!
//! let config = AppConfig::from_env()?;
//! let sender = app_builder::build_mail_sender(&config.mail)?;
//! let state = app_builder::build_contact_state(&config, sender);
//! let app = app_builder::build_router(state, &config.cors);
//! ```

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
