//! # Observability 基盤
//!
//! トレーシング初期化とリクエスト単位のスパン生成を提供する。
//!
//! - 環境変数 `LOG_FORMAT` による JSON / Pretty 出力の切り替え
//! - `X-Request-Id` の生成（UUID v7）と、リクエストスパンへの埋め込み
//!
//! ## レイヤー構成例
//!
//! ```rust,ignore
//! use contact_relay_shared::observability::{MakeRequestUuidV7, make_request_span};
//! use tower_http::{
//!     request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
//!     trace::TraceLayer,
//! };
//!
//! let app = router
//!     .layer(PropagateRequestIdLayer::x_request_id())
//!     .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
//!     .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
//! ```

use http::Request;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// リクエスト ID のヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ログ出力形式
///
/// 環境変数 `LOG_FORMAT` で切り替える。
/// 値が未設定または不正な場合は [`Pretty`](LogFormat::Pretty) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Pretty`](LogFormat::Pretty) にフォールバックし、
    /// stderr に警告を出力する。トレーシング初期化前に呼ばれるため `tracing` は使えない。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(val) => Self::parse(&val),
            Err(_) => Self::default(),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（起動時のルートスパンに付与する）
    pub service_name: String,
    /// ログ出力形式
    pub log_format:   LogFormat,
}

impl TracingConfig {
    /// 新しい設定を作成する
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// 環境変数から設定を読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。
/// 未設定の場合は `"info,contact_relay=debug"` をデフォルトとする。
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,contact_relay=debug".into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// UUID v7 のリクエスト ID を生成する `MakeRequestId` 実装
///
/// クライアントが `X-Request-Id` を付けてきた場合は `SetRequestIdLayer` が
/// その値を優先するため、ここは呼ばれない。
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(value))
    }
}

/// リクエスト単位のスパンを作成する
///
/// `TraceLayer::make_span_with` に渡す。スパンに `request_id` を含めることで、
/// ハンドラ内のすべてのログにリクエスト ID が付与される。
pub fn make_request_span<B>(request: &Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
