//! # 問い合わせ送信ユースケース
//!
//! 検証 → エスケープ → メッセージ生成 → 2 通の並行送信 を 1 リクエスト内で行う。
//!
//! ## 設計方針
//!
//! - **全成功のみ成功**: 通知メールと自動返信の両方が送信できた場合のみ成功とする
//! - **並行送信**: 2 通は同時に送信を開始し、両方の結果が出るまで待つ
//! - **タイムアウト**: 1 通ごとに送信タイムアウトを設け、超過は失敗として扱う
//! - **切断に影響されない**: 送信はタスクとして起動するため、クライアントが切断しても最後まで実行される

use std::{sync::Arc, time::Duration};

use contact_relay_domain::{ContactSubmission, MailError, MessageKind, OutboundMessage};
use contact_relay_infra::MailSender;
use tokio::task::JoinHandle;
use tracing::Instrument;

use super::MessageComposer;
use crate::error::ApiError;

/// 問い合わせ送信サービス
pub struct ContactService {
    sender:       Arc<dyn MailSender>,
    composer:     MessageComposer,
    send_timeout: Duration,
}

impl ContactService {
    pub fn new(
        sender: Arc<dyn MailSender>,
        composer: MessageComposer,
        send_timeout: Duration,
    ) -> Self {
        Self {
            sender,
            composer,
            send_timeout,
        }
    }

    /// 問い合わせを受け付け、通知メールと自動返信を送信する
    ///
    /// # エラー
    ///
    /// - 入力値が不正: [`ApiError::Validation`]（送信は一切行わない）
    /// - いずれかの送信が失敗またはタイムアウト: [`ApiError::Dispatch`]
    pub async fn submit(&self, submission: ContactSubmission) -> Result<(), ApiError> {
        let contact = submission.validate()?.sanitize();

        let [notification, auto_reply] = self
            .composer
            .compose(&contact)
            .into_messages()
            .map(|(kind, message)| (kind, self.dispatch(message)));

        let outcomes = tokio::join!(
            wait_for(notification.0, notification.1),
            wait_for(auto_reply.0, auto_reply.1),
        );

        if let (DispatchOutcome::Sent, DispatchOutcome::Sent) = outcomes {
            tracing::info!("問い合わせメールを送信しました");
            Ok(())
        } else {
            Err(ApiError::Dispatch)
        }
    }

    fn dispatch(&self, message: OutboundMessage) -> JoinHandle<Result<(), MailError>> {
        let sender = Arc::clone(&self.sender);
        let timeout = self.send_timeout;

        tokio::spawn(
            async move {
                tokio::time::timeout(timeout, sender.send(&message))
                    .await
                    .unwrap_or(Err(MailError::Timeout(timeout)))
            }
            .in_current_span(),
        )
    }
}

/// 1 通分の送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    /// 失敗理由（ログ用。呼び出し元には返さない）
    Failed(String),
}

/// 送信タスクの完了を待ち、結果をログに残す
async fn wait_for(
    kind: MessageKind,
    handle: JoinHandle<Result<(), MailError>>,
) -> DispatchOutcome {
    let outcome = match handle.await {
        Ok(Ok(())) => DispatchOutcome::Sent,
        Ok(Err(e)) => DispatchOutcome::Failed(e.to_string()),
        Err(e) => DispatchOutcome::Failed(format!("送信タスクが異常終了: {e}")),
    };

    match &outcome {
        DispatchOutcome::Sent => tracing::debug!(kind = %kind, "メール送信成功"),
        DispatchOutcome::Failed(reason) => {
            tracing::error!(kind = %kind, reason = %reason, "メール送信失敗")
        }
    }

    outcome
}
