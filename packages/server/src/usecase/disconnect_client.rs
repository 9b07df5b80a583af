//! UseCase: クライアント切断処理
//!
//! ハートビートと保留中のデータタイマーを即座に取り消し、接続状態を解放します。
//! 予期しない切断（トランスポートエラー）も通常の切断として扱います。

use std::sync::Arc;

use crate::domain::{ClientId, Connection, ConnectionRepository, FeedScheduler, MessagePusher};

use super::error::DisconnectError;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    repository: Arc<dyn ConnectionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    scheduler: Arc<dyn FeedScheduler>,
}

impl DisconnectClientUseCase {
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        scheduler: Arc<dyn FeedScheduler>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            scheduler,
        }
    }

    /// 切断を実行し、解放した接続を返す
    pub async fn execute(&self, client_id: &ClientId) -> Result<Connection, DisconnectError> {
        // 1. タイマーを先に止める（以降フレームは生成されない）
        self.scheduler.cancel_all(client_id).await;

        // 2. 送信チャンネルの登録解除
        self.message_pusher.unregister_client(client_id).await;

        // 3. 接続状態の削除
        let connection = self.repository.remove_connection(client_id).await?;
        Ok(connection)
    }
}
