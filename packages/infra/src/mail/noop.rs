//! Noop メール送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! ローカル確認や送信を無効化したい環境で使用する。

use async_trait::async_trait;
use contact_relay_domain::{MailError, OutboundMessage};

use super::MailSender;

/// Noop メール送信（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct NoopMailSender;

#[async_trait]
impl MailSender for NoopMailSender {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sendがエラーを返さない() {
        let sender = NoopMailSender;
        let message = OutboundMessage {
            from:      "me@example.com".to_string(),
            to:        "test@example.com".to_string(),
            subject:   "テスト件名".to_string(),
            html_body: "<p>テスト</p>".to_string(),
        };

        assert!(sender.send(&message).await.is_ok());
        assert!(sender.verify().await.is_ok());
    }
}
