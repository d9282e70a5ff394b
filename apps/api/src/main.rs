//! # Contact Relay サーバー
//!
//! 問い合わせフォームを受け付けるメール中継サーバーのエントリーポイント。
//!
//! ## 起動手順
//!
//! 1. `.env` の読み込み（存在する場合）
//! 2. トレーシング初期化
//! 3. 設定読み込み（必須項目が欠けていれば起動を中止する）
//! 4. メール送信実装の構築と、バックグラウンドでの疎通確認
//! 5. ルーター構築とサーバー起動
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用、Mailpit に送信）
//! MAIL_BACKEND=mailpit cargo run -p contact-relay-api
//!
//! # 本番環境（環境変数を直接指定）
//! EMAIL_USER=... EMAIL_APP_PASSWORD=... RECEIVER_EMAIL=... \
//!   cargo run -p contact-relay-api --release
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use contact_relay::{app_builder, config::AppConfig};
use contact_relay_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

const SERVICE_NAME: &str = "contact-relay";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env(SERVICE_NAME);
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = %tracing_config.service_name).entered();

    // 設定読み込み
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "設定の読み込みに失敗しました");
            return Err(e).context("設定の読み込みに失敗しました");
        }
    };
    tracing::debug!(?config, "設定を読み込みました");

    let sender = app_builder::build_mail_sender(&config.mail)
        .context("メール送信の初期化に失敗しました")?;
    tracing::info!(backend = ?config.mail.backend, "メール送信を初期化しました");

    // 疎通確認は起動を妨げない
    tokio::spawn(app_builder::verify_mail_sender(Arc::clone(&sender)));

    let contact_state = app_builder::build_contact_state(&config, sender);
    let app = app_builder::build_router(contact_state, &config.cors);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "{}:{} へのバインドに失敗しました",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!(
        "Contact Relay サーバーが起動しました: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}
