//! # ミドルウェア
//!
//! API サーバー用のミドルウェアを提供する。

mod origin;

pub use origin::{AllowedOrigins, cors_layer, require_allowed_origin};
