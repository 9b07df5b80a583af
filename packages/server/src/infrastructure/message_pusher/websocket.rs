//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - `FeedEvent` をワイヤ形式（JSON）に変換して送信
//!
//! WebSocket の受付と sender の生成は UI 層（`src/ui/handler/websocket.rs`）で行い、
//! この実装は受け取った sender をメッセージ送信に使用します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ClientId, FeedEvent, MessagePushError, MessagePusher, PusherChannel},
    infrastructure::dto::conversion::to_server_message,
};

/// WebSocket を使った MessagePusher 実装
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())));
/// pusher.register_client(client_id, tx).await;
/// pusher.push_to(&client_id, FeedEvent::Info("Started".into())).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: Arc<Mutex<HashMap<ClientId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ClientId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(client_id, sender);
        tracing::debug!("Client {} registered to MessagePusher", client_id);
    }

    async fn unregister_client(&self, client_id: &ClientId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id);
        tracing::debug!("Client {} unregistered from MessagePusher", client_id);
    }

    async fn push_to(&self, client_id: &ClientId, event: FeedEvent) -> Result<(), MessagePushError> {
        let message = to_server_message(client_id, event);
        let content = serde_json::to_string(&message)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;

        let clients = self.clients.lock().await;
        let sender = clients
            .get(client_id)
            .ok_or(MessagePushError::ClientNotFound(client_id.value()))?;
        sender
            .send(content.clone())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("↗ {}", content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataBatch;
    use tokio::sync::mpsc;

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<ClientId, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    #[tokio::test]
    async fn test_push_to_serializes_event_with_client_id() {
        // テスト項目: イベントが clientId 付きの JSON として送信される
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client_id = ClientId::new(7).unwrap();
        pusher.register_client(client_id, tx).await;

        // when (操作):
        let result = pusher
            .push_to(&client_id, FeedEvent::Info("Started".to_string()))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.recv().await,
            Some(r#"{"clientId":7,"info":"Started"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_push_to_preserves_send_order() {
        // テスト項目: 同一クライアントへの送信順が保持される
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client_id = ClientId::new(1).unwrap();
        pusher.register_client(client_id, tx).await;
        let batch = DataBatch::new(vec!["abcdeXab".to_string()]).unwrap();

        // when (操作):
        pusher
            .push_to(&client_id, FeedEvent::Error("Invalid JSON or command".to_string()))
            .await
            .unwrap();
        pusher.push_to(&client_id, FeedEvent::Data(batch)).await.unwrap();

        // then (期待する結果):
        assert!(rx.recv().await.unwrap().contains("\"error\""));
        assert!(rx.recv().await.unwrap().contains("\"data\""));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 登録されていないクライアントへの送信はエラーを返す
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let client_id = ClientId::new(99).unwrap();

        // when (操作):
        let result = pusher
            .push_to(&client_id, FeedEvent::Info("Stopped".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(MessagePushError::ClientNotFound(99)));
    }

    #[tokio::test]
    async fn test_push_to_closed_channel_fails() {
        // テスト項目: 受信側が閉じたチャンネルへの送信は PushFailed になる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, rx) = mpsc::unbounded_channel();
        let client_id = ClientId::new(1).unwrap();
        pusher.register_client(client_id, tx).await;
        drop(rx);

        // when (操作):
        let result = pusher
            .push_to(&client_id, FeedEvent::Info("Started".to_string()))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_unregister_client() {
        // テスト項目: 登録解除後は送信できない
        // given (前提条件):
        let (pusher, clients) = create_test_pusher();
        let (tx, _rx) = mpsc::unbounded_channel();
        let client_id = ClientId::new(1).unwrap();
        pusher.register_client(client_id, tx).await;

        // when (操作):
        pusher.unregister_client(&client_id).await;

        // then (期待する結果):
        assert!(clients.lock().await.is_empty());
    }
}
