//! # ヘルスチェックハンドラ
//!
//! サーバーの稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0"
//! }
//! ```
//!
//! メール送信サービスへの疎通は確認しない（起動時の疎通確認ログを参照）。

use axum::Json;
use contact_relay_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// 常に 200 OK を返す。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
