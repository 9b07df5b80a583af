//! UseCase: クライアント接続処理
//!
//! 新しい ClientId を採番し、送信チャンネルを登録して、
//! ハートビートを即座に開始します。データフィードはコマンドを受けるまで送りません。

use std::sync::Arc;

use livefeed_shared::time::Clock;

use crate::domain::{
    ClientIdFactory, Connection, ConnectionRepository, FeedScheduler, MessagePusher, PusherChannel,
};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// ClientId の採番器（プロセス内で単調増加）
    id_factory: ClientIdFactory,
    repository: Arc<dyn ConnectionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    scheduler: Arc<dyn FeedScheduler>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    pub fn new(
        id_factory: ClientIdFactory,
        repository: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        scheduler: Arc<dyn FeedScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            id_factory,
            repository,
            message_pusher,
            scheduler,
            clock,
        }
    }

    /// 接続を受け付ける
    ///
    /// # Returns
    ///
    /// * `Ok(Connection)` - 登録された接続（データフィードは Idle）
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(&self, sender: PusherChannel) -> Result<Connection, ConnectError> {
        // 1. ClientId の採番
        let client_id = self.id_factory.generate();
        let connection = Connection::new(client_id, self.clock.now_utc());

        // 2. Repository に接続を追加
        self.repository.add_connection(connection.clone()).await?;

        // 3. 送信チャンネルを登録
        self.message_pusher.register_client(client_id, sender).await;

        // 4. ハートビート開始
        self.scheduler.start_heartbeat(&client_id).await;

        Ok(connection)
    }
}
