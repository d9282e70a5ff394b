//! # メール送信
//!
//! 完成済みの [`OutboundMessage`] をメール送信サービスに渡すインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailSender` trait で送信方法を抽象化し、テストではスタブに差し替える
//! - **1 回だけ試行**: リトライは行わず、失敗理由をそのまま返す
//! - **環境変数切替**: `MAIL_BACKEND` で実装をランタイム選択（smtp / mailpit / noop）

mod noop;
mod smtp;

use async_trait::async_trait;
use contact_relay_domain::{MailError, OutboundMessage};
pub use noop::NoopMailSender;
pub use smtp::{SmtpCredentials, SmtpMailSender};

/// メール送信トレイト
///
/// 「完成済みのメッセージを受け取り、1 回の送信を試みて成否を返す」能力のみを表す。
#[async_trait]
pub trait MailSender: Send + Sync {
    /// メールを 1 通送信する
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError>;

    /// 送信サービスへの疎通を確認する
    ///
    /// 起動時に一度だけ呼ばれる。結果はログに出すのみで、サーバーの起動は妨げない。
    async fn verify(&self) -> Result<(), MailError> {
        Ok(())
    }
}
