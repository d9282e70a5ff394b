//! # アプリケーション構築
//!
//! DI（メール送信・State）の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::{any::Any, sync::Arc};

use axum::{
    Router,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use contact_relay_domain::MailError;
use contact_relay_infra::{MailSender, NoopMailSender, SmtpMailSender};
use contact_relay_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::{AppConfig, CorsConfig, MailBackend, MailConfig},
    error::ApiError,
    handler::{ContactState, health_check, not_found, submit_contact},
    middleware::{AllowedOrigins, cors_layer, require_allowed_origin},
    usecase::{ContactService, MessageComposer},
};

/// 設定に応じたメール送信実装を構築する
///
/// SMTP の場合も接続はここでは行わない（最初の送信または疎通確認時に接続する）。
pub fn build_mail_sender(config: &MailConfig) -> Result<Arc<dyn MailSender>, MailError> {
    let sender: Arc<dyn MailSender> = match config.backend {
        MailBackend::Smtp => Arc::new(SmtpMailSender::relay(
            &config.smtp_host,
            config.smtp_port,
            config.credentials.clone(),
            config.send_timeout,
        )?),
        MailBackend::Mailpit => Arc::new(SmtpMailSender::local(
            &config.smtp_host,
            config.smtp_port,
        )),
        MailBackend::Noop => Arc::new(NoopMailSender),
    };

    Ok(sender)
}

/// メール送信サービスへの疎通を確認し、結果をログに残す
///
/// 失敗しても起動は継続する。戻り値は疎通できたかどうか。
pub async fn verify_mail_sender(sender: Arc<dyn MailSender>) -> bool {
    match sender.verify().await {
        Ok(()) => {
            tracing::info!("メール送信サービスに接続できました");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "メール送信サービスへの接続確認に失敗しました");
            false
        }
    }
}

/// 問い合わせ API の State を構築する
pub fn build_contact_state(config: &AppConfig, sender: Arc<dyn MailSender>) -> Arc<ContactState> {
    let composer = MessageComposer::new(
        config.mail.sender_address(),
        config.mail.receiver_email.as_str(),
        &config.mail.owner_name,
    );

    Arc::new(ContactState {
        service: ContactService::new(sender, composer, config.mail.send_timeout),
    })
}

/// ルーターを構築する
pub fn build_router(contact_state: Arc<ContactState>, cors: &CorsConfig) -> Router {
    let allowed_origins = AllowedOrigins::new(&cors.allowed_origins);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/contact", post(submit_contact))
        .with_state(contact_state)
        .fallback(not_found)
        // レイヤー順序が重要: 下に書いたものが外側
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        // 4. require_allowed_origin: 許可されていないオリジンをプリフライトも含めて拒否
        // 5. CorsLayer: 許可オリジンにのみ CORS ヘッダーを付与
        // 6. CatchPanicLayer（最内）: ハンドラのパニックを 500 に変換
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(&allowed_origins))
        .layer(from_fn_with_state(allowed_origins, require_allowed_origin))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "不明なパニック".to_string()
    };

    ApiError::Internal(anyhow::anyhow!("リクエスト処理中にパニック: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use contact_relay_infra::mock::MockMailSender;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorResponse;

    fn config(backend: &str) -> AppConfig {
        AppConfig::from_lookup(|name| match name {
            "EMAIL_USER" => Some("me@example.com".to_string()),
            "EMAIL_APP_PASSWORD" => Some("app-password".to_string()),
            "RECEIVER_EMAIL" => Some("owner@example.com".to_string()),
            "MAIL_BACKEND" => Some(backend.to_string()),
            "SMTP_HOST" => Some("localhost".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn パニックは500の汎用メッセージに変換される() {
        let response = handle_panic(Box::new("boom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, ErrorResponse::new("Something broke!"));
    }

    #[tokio::test]
    async fn noopバックエンドの送信実装は疎通確認に成功する() {
        let sender = build_mail_sender(&config("noop").mail).unwrap();

        assert!(sender.verify().await.is_ok());
    }

    #[tokio::test]
    async fn 疎通確認に成功した場合はtrueを返す() {
        assert!(verify_mail_sender(Arc::new(MockMailSender::new())).await);
    }

    #[tokio::test]
    async fn 疎通確認に失敗してもエラーを返さずfalseとなる() {
        let sender = Arc::new(MockMailSender::new().failing_verify());

        assert!(!verify_mail_sender(sender).await);
    }

    #[tokio::test]
    async fn mailpitバックエンドは接続せずに構築できる() {
        assert!(build_mail_sender(&config("mailpit").mail).is_ok());
    }
}
