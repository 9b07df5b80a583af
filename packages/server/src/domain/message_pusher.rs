//! MessagePusher trait 定義
//!
//! 接続中のクライアントへイベントを届けるためのインターフェース。
//! ワイヤ形式への変換と実際の送信は Infrastructure 層が担当します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ClientId, FeedEvent, MessagePushError};

/// クライアントへの送信チャンネル（シリアライズ済みの JSON フレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel);

    /// クライアントの送信チャンネルを削除
    async fn unregister_client(&self, client_id: &ClientId);

    /// 特定のクライアントにイベントを送信
    async fn push_to(&self, client_id: &ClientId, event: FeedEvent) -> Result<(), MessagePushError>;
}
