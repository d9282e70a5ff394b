//! # 問い合わせハンドラ
//!
//! ポートフォリオサイトの問い合わせフォームを受け付ける。
//!
//! ## エンドポイント
//!
//! - `POST /api/contact` - 問い合わせを受け付け、通知メールと自動返信を送信する
//!
//! ## リクエスト例
//!
//! ```json
//! {
//!   "name": "Jane Doe",
//!   "email": "jane@example.com",
//!   "message": "Hello"
//! }
//! ```

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use contact_relay_domain::ContactSubmission;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, usecase::ContactService};

/// 送信成功時のメッセージ
pub const SENT_MESSAGE: &str = "Message sent successfully";

/// 問い合わせ API の共有状態
pub struct ContactState {
    pub service: ContactService,
}

/// 送信成功レスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactResponse {
    pub message: String,
}

/// POST /api/contact
///
/// JSON として解釈できないボディは 400 で拒否する。
/// 未知のフィールドは無視し、欠けているフィールドは検証で 400 になる。
pub async fn submit_contact(
    State(state): State<Arc<ContactState>>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(submission) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

    state.service.submit(submission).await?;

    Ok(Json(ContactResponse {
        message: SENT_MESSAGE.to_string(),
    }))
}
