//! # Contact Relay 共有ユーティリティ
//!
//! ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（HTTP 型は `http` クレートのものを使う）

pub mod health;
pub mod observability;

pub use health::HealthResponse;
