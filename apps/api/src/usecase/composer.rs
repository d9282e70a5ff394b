//! # メッセージ生成
//!
//! エスケープ済みの送信内容から、固定文面の 2 通のメールを組み立てる。
//!
//! - **通知メール**: 送信元アカウント → 設定された受信者
//! - **自動返信**: 送信元アカウント → 送信者本人
//!
//! 純粋な関数であり、同じ入力からは常に同じメッセージが生成される。

use contact_relay_domain::{MessageKind, OutboundMessage, SanitizedContact, sanitize::escape_html};

const AUTO_REPLY_SUBJECT: &str = "Thank you for your message";

/// 1 件の送信内容から生成される 2 通のメール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessages {
    /// 受信者への通知
    pub notification: OutboundMessage,
    /// 送信者への自動返信
    pub auto_reply:   OutboundMessage,
}

impl ComposedMessages {
    /// 種別付きで 2 通を取り出す
    pub fn into_messages(self) -> [(MessageKind, OutboundMessage); 2] {
        [
            (MessageKind::Notification, self.notification),
            (MessageKind::AutoReply, self.auto_reply),
        ]
    }
}

/// メッセージ生成器
///
/// 送信元・受信者・署名は起動時の設定から決まり、以降変わらない。
#[derive(Debug, Clone)]
pub struct MessageComposer {
    sender:     String,
    receiver:   String,
    /// 自動返信の署名（エスケープ済み）
    owner_name: String,
}

impl MessageComposer {
    /// 新しい生成器を作成する
    ///
    /// # 引数
    ///
    /// - `sender`: 送信元メールアドレス
    /// - `receiver`: 通知メールの受信者
    /// - `owner_name`: 自動返信の署名に使う名前（ここで一度だけエスケープする）
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        owner_name: &str,
    ) -> Self {
        Self {
            sender:     sender.into(),
            receiver:   receiver.into(),
            owner_name: escape_html(owner_name),
        }
    }

    /// 通知メールと自動返信を生成する
    pub fn compose(&self, contact: &SanitizedContact) -> ComposedMessages {
        ComposedMessages {
            notification: OutboundMessage {
                from:      self.sender.clone(),
                to:        self.receiver.clone(),
                subject:   format!("Portfolio Contact: {}", contact.name()),
                html_body: notification_body(contact),
            },
            auto_reply:   OutboundMessage {
                from:      self.sender.clone(),
                to:        contact.reply_address().to_string(),
                subject:   AUTO_REPLY_SUBJECT.to_string(),
                html_body: auto_reply_body(contact, &self.owner_name),
            },
        }
    }
}

fn notification_body(contact: &SanitizedContact) -> String {
    format!(
        r#"
      <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
        <h2 style="color: #0891b2;">New Portfolio Contact Message</h2>
        <div style="border-left: 4px solid #0891b2; padding-left: 15px; margin: 20px 0;">
          <p><strong>From:</strong> {name}</p>
          <p><strong>Email:</strong> {email}</p>
          <p><strong>Message:</strong></p>
          <p style="white-space: pre-wrap;">{message}</p>
        </div>
        <div style="margin-top: 20px; font-size: 12px; color: #666;">
          <p>This message was sent from your portfolio contact form.</p>
        </div>
      </div>
    "#,
        name = contact.name(),
        email = contact.email(),
        message = contact.message(),
    )
}

fn auto_reply_body(contact: &SanitizedContact, owner_name: &str) -> String {
    format!(
        r#"
      <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
        <h2 style="color: #0891b2;">Thank You for Contacting Me</h2>
        <p>Dear {name},</p>
        <p>Thank you for reaching out through my portfolio. I have received your message and will get back to you as soon as possible at this email address.</p>
        <div style="border-left: 4px solid #0891b2; padding-left: 15px; margin: 20px 0;">
          <p><strong>Your message:</strong></p>
          <p style="white-space: pre-wrap;">{message}</p>
        </div>
        <p>Best regards,<br>{owner_name}</p>
        <div style="margin-top: 20px; font-size: 12px; color: #666;">
          <p>This is an automated response. Please do not reply to this email.</p>
        </div>
      </div>
    "#,
        name = contact.name(),
        message = contact.message(),
    )
}
