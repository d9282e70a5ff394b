//! # オリジン制限
//!
//! ブラウザからのリクエストを、設定された許可オリジンに限定する。
//!
//! - [`require_allowed_origin`]: 許可リストにない `Origin` を 403 で拒否するミドルウェア
//! - [`cors_layer`]: 許可オリジンに対して CORS ヘッダーを付与するレイヤー
//!
//! `Origin` ヘッダーのないリクエスト（curl やサーバー間通信）は制限しない。
//! ガードは `CorsLayer` より外側に置くため、許可されていないオリジンの
//! プリフライトも 403 になり、CORS ヘッダーは一切付与されない。

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::ApiError;

/// 許可オリジンの一覧
///
/// 完全一致で比較する（末尾スラッシュやスキームの違いは別オリジンとして扱う）。
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Arc<[String]>,
}

impl AllowedOrigins {
    pub fn new(origins: &[String]) -> Self {
        Self {
            origins: origins.into(),
        }
    }

    /// 許可されたオリジンかどうか
    pub fn contains(&self, origin: &str) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
    }
}

/// 許可リストにないオリジンからのリクエストを拒否する
pub async fn require_allowed_origin(
    State(allowed): State<AllowedOrigins>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(origin) = request.headers().get(header::ORIGIN) else {
        return next.run(request).await;
    };

    match origin.to_str() {
        Ok(origin) if allowed.contains(origin) => next.run(request).await,
        _ => {
            let origin = String::from_utf8_lossy(origin.as_bytes()).into_owned();
            ApiError::OriginNotAllowed(origin).into_response()
        }
    }
}

/// 許可オリジン向けの CORS レイヤーを構築する
///
/// 認証情報付きリクエストを許可するため、オリジンとヘッダーはワイルドカードではなく
/// 明示的に列挙する。
pub fn cors_layer(allowed: &AllowedOrigins) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ヘッダー値にできないオリジンを無視します");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
