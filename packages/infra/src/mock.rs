//! # テスト用モック送信
//!
//! ユースケーステストや API テストで使用するインメモリのメール送信。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! contact-relay-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use contact_relay_domain::{MailError, OutboundMessage};

use crate::mail::MailSender;

/// 送信内容を記録するモック
///
/// `clone()` したインスタンス同士は記録を共有するため、
/// 片方を `Arc<dyn MailSender>` として注入し、もう片方で結果を確認できる。
#[derive(Debug, Clone, Default)]
pub struct MockMailSender {
    attempts:           Arc<Mutex<Vec<OutboundMessage>>>,
    delivered:          Arc<Mutex<Vec<OutboundMessage>>>,
    failing_recipients: Vec<String>,
    delay:              Option<Duration>,
    verify_fails:       bool,
}

impl MockMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した宛先への送信を失敗させる
    pub fn failing_for(mut self, recipient: impl Into<String>) -> Self {
        self.failing_recipients.push(recipient.into());
        self
    }

    /// 送信のたびに指定時間だけ待機する
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 疎通確認を失敗させる
    pub fn failing_verify(mut self) -> Self {
        self.verify_fails = true;
        self
    }

    /// 送信を試みたメッセージ（失敗分を含む）
    pub fn attempts(&self) -> Vec<OutboundMessage> {
        self.attempts.lock().unwrap().clone()
    }

    /// 送信に成功したメッセージ
    pub fn delivered(&self) -> Vec<OutboundMessage> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError> {
        self.attempts.lock().unwrap().push(message.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_recipients.contains(&message.to) {
            return Err(MailError::SendFailed(format!(
                "モック送信失敗: {}",
                message.to
            )));
        }

        self.delivered.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn verify(&self) -> Result<(), MailError> {
        if self.verify_fails {
            return Err(MailError::SendFailed("モック疎通確認失敗".to_string()));
        }
        Ok(())
    }
}
