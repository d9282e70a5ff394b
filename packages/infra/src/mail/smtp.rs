//! SMTP メール送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//!
//! - [`SmtpMailSender::relay`]: TLS + 認証付きで SMTP リレー（Gmail 等）に接続する
//! - [`SmtpMailSender::local`]: TLS なしでローカル SMTP サーバー（Mailpit 等）に接続する
//!
//! 接続は lettre のコネクションプールで再利用される。

use std::{fmt, time::Duration};

use async_trait::async_trait;
use contact_relay_domain::{MailError, OutboundMessage};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
};

use super::MailSender;

/// STARTTLS で接続するサブミッションポート
const SUBMISSION_PORT: u16 = 587;

/// SMTP 認証情報
#[derive(Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// SMTP メール送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailSender {
    /// TLS 接続の SMTP リレーに認証付きで接続する送信インスタンスを作成
    ///
    /// ポート 587 の場合は STARTTLS、それ以外は接続直後から TLS（SMTPS）を使う。
    /// 実際の接続は最初の送信時に行われる。
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "smtp.gmail.com"）
    /// - `port`: SMTP サーバーのポート番号（例: 465）
    /// - `credentials`: 送信アカウントの認証情報
    /// - `timeout`: 1 回の SMTP 操作あたりのタイムアウト
    pub fn relay(
        host: &str,
        port: u16,
        credentials: SmtpCredentials,
        timeout: Duration,
    ) -> Result<Self, MailError> {
        let builder = if port == SUBMISSION_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        };
        let builder = builder
            .map_err(|e| MailError::SendFailed(format!("SMTP リレーの初期化に失敗: {e}")))?;

        let transport = builder
            .port(port)
            .credentials(Credentials::new(
                credentials.username,
                credentials.password,
            ))
            .timeout(Some(timeout))
            .build();

        Ok(Self { transport })
    }

    /// TLS なしのローカル SMTP サーバーに接続する送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    pub fn local(host: &str, port: u16) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self { transport }
    }
}

/// `OutboundMessage` を lettre のメッセージに変換する
fn build_message(message: &OutboundMessage) -> Result<Message, MailError> {
    Message::builder()
        .from(
            message
                .from
                .parse()
                .map_err(|e| MailError::InvalidMessage(format!("送信元アドレス不正: {e}")))?,
        )
        .to(message
            .to
            .parse()
            .map_err(|e| MailError::InvalidMessage(format!("宛先アドレス不正: {e}")))?)
        .subject(&message.subject)
        .header(ContentType::TEXT_HTML)
        .body(message.html_body.clone())
        .map_err(|e| MailError::InvalidMessage(format!("メッセージ構築失敗: {e}")))
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError> {
        let email = build_message(message)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }

    async fn verify(&self) -> Result<(), MailError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailError::SendFailed(
                "SMTP サーバーが応答しません".to_string(),
            )),
            Err(e) => Err(MailError::SendFailed(format!("SMTP 接続確認に失敗: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(from: &str, to: &str) -> OutboundMessage {
        OutboundMessage {
            from:      from.to_string(),
            to:        to.to_string(),
            subject:   "Portfolio Contact: Jane".to_string(),
            html_body: "<p>Hello</p>".to_string(),
        }
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpMailSender>();
    }

    #[test]
    fn 認証情報のdebug出力でパスワードが隠される() {
        let credentials = SmtpCredentials {
            username: "me@example.com".to_string(),
            password: "app-password".to_string(),
        };

        let debug = format!("{credentials:?}");

        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("app-password"));
    }

    #[test]
    fn 送信元アドレスが不正ならinvalid_messageになる() {
        let result = build_message(&message("not an address", "jane@example.com"));

        assert!(matches!(result, Err(MailError::InvalidMessage(_))));
    }

    #[test]
    fn 宛先アドレスが不正ならinvalid_messageになる() {
        let result = build_message(&message("me@example.com", "no-at-sign"));

        assert!(matches!(result, Err(MailError::InvalidMessage(_))));
    }

    #[test]
    fn 正しいアドレスならメッセージを構築できる() {
        let email = build_message(&message("me@example.com", "jane@example.com")).unwrap();

        let formatted = String::from_utf8(email.formatted()).unwrap();
        assert!(formatted.contains("Subject: Portfolio Contact: Jane"));
        assert!(formatted.contains("Content-Type: text/html"));
    }

    #[tokio::test]
    async fn 接続できないサーバーへの送信はsend_failedになる() {
        // 一度バインドして解放したポートには誰も待ち受けていない
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let sender = SmtpMailSender::local("127.0.0.1", port);
        let result = sender.send(&message("me@example.com", "jane@example.com")).await;

        let Err(MailError::SendFailed(reason)) = result else {
            panic!("SendFailed を期待したが {result:?} だった");
        };
        assert!(reason.starts_with("SMTP 送信失敗"), "{reason}");
    }
}
