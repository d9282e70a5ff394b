//! # 送信メール
//!
//! 1 件のお問い合わせから生成される 2 通のメールと、送信時のエラーを定義する。
//!
//! | 種別 | 宛先 | 用途 |
//! |------|------|------|
//! | [`MessageKind::Notification`] | 設定された受信者 | サイト管理者への通知 |
//! | [`MessageKind::AutoReply`] | 送信者本人 | 受付確認の自動返信 |

use std::{fmt, time::Duration};

use thiserror::Error;

/// メール送信エラー
///
/// 原因の詳細は運用者向けのログにのみ出力し、API レスポンスには含めない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    /// 送信元・宛先アドレスの解析やメッセージ構築に失敗
    #[error("メッセージの構築に失敗: {0}")]
    InvalidMessage(String),

    /// メール送信サービスへの送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// 送信が制限時間内に完了しなかった
    #[error("メール送信がタイムアウトしました（{0:?}）")]
    Timeout(Duration),
}

/// 送信メール
///
/// メール送信サービスに渡す完成済みのメッセージ。
/// `html_body` に含まれるユーザー入力はすべてエスケープ済みであること。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// 送信元メールアドレス
    pub from:      String,
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
}

/// 送信メールの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// 管理者への通知
    Notification,
    /// 送信者への自動返信
    AutoReply,
}

impl MessageKind {
    /// ログ出力用の識別子
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::AutoReply => "auto_reply",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
