//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── contact.rs  # 問い合わせ受付
//!     └── health.rs   # ヘルスチェック
//! ```

pub mod contact;
pub mod health;

pub use contact::{ContactResponse, ContactState, submit_contact};
pub use health::health_check;

use crate::error::ApiError;

/// どのルートにも一致しないリクエスト
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
