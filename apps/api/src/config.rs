//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。起動時に一度だけ構築し、
//! 以降は読み取り専用で各コンポーネントに渡す。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `EMAIL_USER` | **Yes** | - | 送信アカウント（送信元アドレス） |
//! | `EMAIL_APP_PASSWORD` | **Yes** | - | 送信アカウントのパスワード |
//! | `RECEIVER_EMAIL` | **Yes** | - | 通知メールの受信者 |
//! | `HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `PORT` | No | `3001` | ポート番号 |
//! | `ALLOWED_ORIGINS` | No | [`DEFAULT_ALLOWED_ORIGINS`] | CORS 許可オリジン（カンマ区切り） |
//! | `MAIL_BACKEND` | No | `smtp` | 送信バックエンド（`smtp` / `mailpit` / `noop`） |
//! | `SMTP_HOST` | No | `smtp.gmail.com` | SMTP ホスト |
//! | `SMTP_PORT` | No | `465`（mailpit は `1025`） | SMTP ポート |
//! | `MAIL_SEND_TIMEOUT_SECS` | No | `10` | 1 通あたりの送信タイムアウト（秒） |
//! | `CONTACT_OWNER_NAME` | No | `ELMESTARI Abdelmonim` | 自動返信の署名 |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use contact_relay::config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("サーバー: {}:{}", config.server.host, config.server.port);
//! ```

use std::{env, str::FromStr, time::Duration};

use contact_relay_infra::SmtpCredentials;
use thiserror::Error;

/// デフォルトの CORS 許可オリジン
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://portfolio-website-omega-sage.vercel.app",
];

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_MAILPIT_PORT: u16 = 1025;
const DEFAULT_SEND_TIMEOUT_SECS: u64 = 10;
const DEFAULT_OWNER_NAME: &str = "ELMESTARI Abdelmonim";

/// 設定読み込みエラー
///
/// どの環境変数が原因かをメッセージに含め、運用者がすぐに修正できるようにする。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定（または空）
    #[error("必須の環境変数が設定されていません: {0}")]
    Missing(&'static str),

    /// 環境変数の値を解釈できない
    #[error("環境変数 {name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// HTTP サーバー設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// バインドアドレス（例: `0.0.0.0`, `127.0.0.1`）
    pub host: String,
    /// ポート番号
    pub port: u16,
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailBackend {
    /// TLS + 認証付きの SMTP リレー（本番）
    Smtp,
    /// TLS なしのローカル SMTP サーバー（開発）
    Mailpit,
    /// 送信しない（ログ出力のみ）
    Noop,
}

impl FromStr for MailBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smtp" => Ok(Self::Smtp),
            "mailpit" => Ok(Self::Mailpit),
            "noop" => Ok(Self::Noop),
            _ => Err(()),
        }
    }
}

/// メール送信設定
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// 送信バックエンド
    pub backend:        MailBackend,
    /// SMTP ホスト
    pub smtp_host:      String,
    /// SMTP ポート
    pub smtp_port:      u16,
    /// 送信アカウントの認証情報（`username` は送信元アドレスを兼ねる）
    pub credentials:    SmtpCredentials,
    /// 通知メールの受信者
    pub receiver_email: String,
    /// 1 通あたりの送信タイムアウト
    pub send_timeout:   Duration,
    /// 自動返信の署名に使う名前
    pub owner_name:     String,
}

impl MailConfig {
    /// 送信元アドレス
    pub fn sender_address(&self) -> &str {
        &self.credentials.username
    }
}

/// CORS 設定
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// 許可するオリジンの一覧
    pub allowed_origins: Vec<String>,
}

/// アプリケーション全体の設定
///
/// アプリケーション起動時に一度だけ構築し、各コンポーネントに渡す。
/// パスワードは `SmtpCredentials` の `Debug` 実装で伏せ字になる。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP サーバー設定
    pub server: ServerConfig,
    /// メール送信設定
    pub mail:   MailConfig,
    /// CORS 設定
    pub cors:   CorsConfig,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # エラー
    ///
    /// - 必須の環境変数が未設定または空: [`ConfigError::Missing`]
    /// - 数値やバックエンド名を解釈できない: [`ConfigError::Invalid`]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// テストでプロセスの環境変数を書き換えずに設定を組み立てるために使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars { lookup };

        // 必須項目を先に検証し、不足があれば他の値を解釈する前に報告する
        let email_user = vars.required("EMAIL_USER")?;
        let email_app_password = vars.required("EMAIL_APP_PASSWORD")?;
        let receiver_email = vars.required("RECEIVER_EMAIL")?;

        let backend = vars.parsed("MAIL_BACKEND", MailBackend::Smtp)?;
        let default_smtp_port = match backend {
            MailBackend::Mailpit => DEFAULT_MAILPIT_PORT,
            MailBackend::Smtp | MailBackend::Noop => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            server: ServerConfig {
                host: vars.or("HOST", DEFAULT_HOST),
                port: vars.parsed("PORT", DEFAULT_PORT)?,
            },
            mail:   MailConfig {
                backend,
                smtp_host: vars.or("SMTP_HOST", DEFAULT_SMTP_HOST),
                smtp_port: vars.parsed("SMTP_PORT", default_smtp_port)?,
                credentials: SmtpCredentials {
                    username: email_user,
                    password: email_app_password,
                },
                receiver_email,
                send_timeout: Duration::from_secs(
                    vars.parsed("MAIL_SEND_TIMEOUT_SECS", DEFAULT_SEND_TIMEOUT_SECS)?,
                ),
                owner_name: vars.or("CONTACT_OWNER_NAME", DEFAULT_OWNER_NAME),
            },
            cors:   CorsConfig {
                allowed_origins: vars.origins("ALLOWED_ORIGINS"),
            },
        })
    }
}

/// 環境変数の参照ヘルパー
///
/// 空文字列（または空白のみ）の値は未設定として扱う。
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing(name))
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(name) {
            Some(value) => {
                let parsed = value.trim().parse::<T>();
                parsed.map_err(|_| ConfigError::Invalid { name, value })
            }
            None => Ok(default),
        }
    }

    fn origins(&self, name: &str) -> Vec<String> {
        match self.get(name) {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("EMAIL_USER", "me@example.com"),
        ("EMAIL_APP_PASSWORD", "app-password"),
        ("RECEIVER_EMAIL", "owner@example.com"),
    ];

    fn with_required(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        REQUIRED.iter().chain(extra.iter()).copied().collect()
    }

    #[test]
    fn 必須項目のみでデフォルト値が使われる() {
        let config = load(REQUIRED).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.mail.backend, MailBackend::Smtp);
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.mail.smtp_port, 465);
        assert_eq!(config.mail.sender_address(), "me@example.com");
        assert_eq!(config.mail.receiver_email, "owner@example.com");
        assert_eq!(config.mail.send_timeout, Duration::from_secs(10));
        assert_eq!(config.mail.owner_name, "ELMESTARI Abdelmonim");
        assert_eq!(
            config.cors.allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://portfolio-website-omega-sage.vercel.app".to_string(),
            ]
        );
    }

    #[rstest]
    #[case("EMAIL_USER")]
    #[case("EMAIL_APP_PASSWORD")]
    #[case("RECEIVER_EMAIL")]
    fn 必須項目が欠けていると変数名付きのエラーになる(#[case] missing: &'static str) {
        let vars: Vec<_> = REQUIRED
            .iter()
            .filter(|(name, _)| *name != missing)
            .copied()
            .collect();

        let result = load(&vars);

        assert_eq!(result.unwrap_err(), ConfigError::Missing(missing));
    }

    #[test]
    fn 空文字の必須項目は未設定として扱う() {
        let vars = [
            ("EMAIL_USER", "me@example.com"),
            ("EMAIL_APP_PASSWORD", "   "),
            ("RECEIVER_EMAIL", "owner@example.com"),
        ];

        let result = load(&vars);

        assert_eq!(
            result.unwrap_err(),
            ConfigError::Missing("EMAIL_APP_PASSWORD")
        );
    }

    #[test]
    fn エラーメッセージに変数名が含まれる() {
        let err = load(&[]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "必須の環境変数が設定されていません: EMAIL_USER"
        );
    }

    #[test]
    fn 任意項目を上書きできる() {
        let config = load(&with_required(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("MAIL_BACKEND", "noop"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "587"),
            ("MAIL_SEND_TIMEOUT_SECS", "3"),
            ("CONTACT_OWNER_NAME", "Jane Owner"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example ,"),
        ]))
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mail.backend, MailBackend::Noop);
        assert_eq!(config.mail.smtp_host, "smtp.example.com");
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.mail.send_timeout, Duration::from_secs(3));
        assert_eq!(config.mail.owner_name, "Jane Owner");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn mailpitのデフォルトポートは1025() {
        let config = load(&with_required(&[("MAIL_BACKEND", "mailpit")])).unwrap();

        assert_eq!(config.mail.backend, MailBackend::Mailpit);
        assert_eq!(config.mail.smtp_port, 1025);
    }

    #[rstest]
    #[case("PORT", "not-a-port")]
    #[case("PORT", "70000")]
    #[case("SMTP_PORT", "-1")]
    #[case("MAIL_SEND_TIMEOUT_SECS", "ten")]
    #[case("MAIL_BACKEND", "ses")]
    fn 解釈できない値はinvalidになる(#[case] name: &'static str, #[case] value: &'static str) {
        let result = load(&with_required(&[(name, value)]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                name,
                value: value.to_string(),
            }
        );
    }
}
