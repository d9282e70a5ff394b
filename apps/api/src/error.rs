//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## 設計方針
//!
//! - **thiserror + anyhow**: 型安全なエラー定義と、想定外エラーの受け皿を両立
//! - **IntoResponse 実装**: ハンドラは `Result<_, ApiError>` を返すだけでよい
//! - **内部情報を返さない**: 送信失敗や想定外エラーの詳細はログにのみ出力する
//!
//! ## レスポンス形式
//!
//! すべてのエラーは `{"error": "<メッセージ>"}` の形で返す。
//!
//! | ApiError | HTTP Status | `error` |
//! |----------|-------------|---------|
//! | Validation | 400 | バリデーションエラーの文言 |
//! | InvalidBody | 400 | `Invalid request body` |
//! | OriginNotAllowed | 403 | [`ORIGIN_NOT_ALLOWED_MESSAGE`] |
//! | NotFound | 404 | `Not Found` |
//! | Dispatch | 500 | [`DISPATCH_FAILED_MESSAGE`] |
//! | Internal | 500 | [`INTERNAL_ERROR_MESSAGE`] |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contact_relay_domain::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 送信失敗時のメッセージ
pub const DISPATCH_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

/// 想定外エラー時のメッセージ
pub const INTERNAL_ERROR_MESSAGE: &str = "Something broke!";

/// 許可されていないオリジンからのリクエストに対するメッセージ
pub const ORIGIN_NOT_ALLOWED_MESSAGE: &str =
    "The CORS policy for this site does not allow access from the specified Origin.";

const INVALID_BODY_MESSAGE: &str = "Invalid request body";
const NOT_FOUND_MESSAGE: &str = "Not Found";

/// API 層で発生するエラー
///
/// `IntoResponse` を実装しているため、axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力値の検証失敗（400 Bad Request）
    #[error("バリデーションエラー: {0}")]
    Validation(#[from] ValidationError),

    /// JSON として解釈できないリクエストボディ（400 Bad Request）
    #[error("リクエストボディが不正です: {0}")]
    InvalidBody(String),

    /// 許可リストにないオリジン（403 Forbidden）
    #[error("許可されていないオリジンです: {0}")]
    OriginNotAllowed(String),

    /// 存在しないパス（404 Not Found）
    #[error("リソースが見つかりません")]
    NotFound,

    /// メール送信の失敗（500 Internal Server Error）
    ///
    /// 原因は送信時にログ出力済みのため、ここでは保持しない。
    #[error("メール送信に失敗しました")]
    Dispatch,

    /// 想定外のエラー（500 Internal Server Error）
    #[error("内部サーバーエラー")]
    Internal(#[from] anyhow::Error),
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// 呼び出し元に見せるエラーメッセージ
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::InvalidBody(detail) => {
                tracing::debug!(detail = %detail, "リクエストボディを解釈できません");
                (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE.to_string())
            }
            ApiError::OriginNotAllowed(origin) => {
                tracing::warn!(origin = %origin, "許可されていないオリジンからのリクエストを拒否");
                (StatusCode::FORBIDDEN, ORIGIN_NOT_ALLOWED_MESSAGE.to_string())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            ApiError::Dispatch => (
                StatusCode::INTERNAL_SERVER_ERROR,
                DISPATCH_FAILED_MESSAGE.to_string(),
            ),
            ApiError::Internal(err) => {
                // セキュリティ: 内部エラー詳細はログのみ
                tracing::error!("内部エラー: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
