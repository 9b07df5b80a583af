//! UseCase: データフィードのコマンド処理
//!
//! - `start`: Idle なら Scheduled に遷移してタイマーを張る。応答 "Started" は常に返す
//! - `stop`: Scheduled なら Idle に遷移してタイマーを取り消す。応答 "Stopped" は常に返す
//! - 不正な入力: "Invalid JSON or command" を返す。接続は閉じない

use std::sync::Arc;

use livefeed_shared::protocol::{FeedCommand, INVALID_COMMAND_ERROR, STARTED_INFO, STOPPED_INFO};

use crate::domain::{
    ClientId, ConnectionRepository, DataFeedState, FeedEvent, FeedScheduler, MessagePusher,
};

use super::error::CommandError;

/// コマンド処理のユースケース
pub struct HandleCommandUseCase {
    repository: Arc<dyn ConnectionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    scheduler: Arc<dyn FeedScheduler>,
}

impl HandleCommandUseCase {
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

    /// コマンドを実行し、遷移後のデータフィード状態を返す
    pub async fn execute(
        &self,
        client_id: &ClientId,
        command: FeedCommand,
    ) -> Result<DataFeedState, CommandError> {
        let mut connection = self.repository.get_connection(client_id).await?;

        match command {
            FeedCommand::Start => {
                let changed = connection.start_feed();
                self.repository.save_connection(connection.clone()).await?;
                // "Started" を先に積んでから最初のバッチのタイマーを張る
                self.acknowledge(client_id, STARTED_INFO).await?;
                if changed {
                    self.scheduler.start_data_feed(client_id).await;
                }
            }
            FeedCommand::Stop => {
                // 取り消し完了後に "Stopped" を積むので、以降にデータは届かない
                if connection.stop_feed() {
                    self.scheduler.stop_data_feed(client_id).await;
                }
                self.repository.save_connection(connection.clone()).await?;
                self.acknowledge(client_id, STOPPED_INFO).await?;
            }
        }

        tracing::info!(
            "Client {} command '{}' handled, data feed {:?}",
            client_id,
            command,
            connection.feed
        );
        Ok(connection.feed)
    }

    /// 不正なフレームを報告する（状態は変えない）
    pub async fn reject_invalid(&self, client_id: &ClientId) -> Result<(), CommandError> {
        self.message_pusher
            .push_to(client_id, FeedEvent::Error(INVALID_COMMAND_ERROR.to_string()))
            .await?;
        Ok(())
    }

    async fn acknowledge(&self, client_id: &ClientId, info: &str) -> Result<(), CommandError> {
        self.message_pusher
            .push_to(client_id, FeedEvent::Info(info.to_string()))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Connection, MessagePushError, message_pusher::MockMessagePusher,
            scheduler::MockFeedScheduler,
        },
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryConnectionRepository,
        },
    };
    use chrono::Utc;
    use livefeed_shared::protocol::ServerMessage;
    use tokio::sync::mpsc;

    struct Fixture {
        usecase: HandleCommandUseCase,
        repository: Arc<InMemoryConnectionRepository>,
        client_id: ClientId,
        rx: mpsc::UnboundedReceiver<String>,
    }

    async fn create_fixture(scheduler: MockFeedScheduler) -> Fixture {
        let repository = Arc::new(InMemoryConnectionRepository::new());
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let client_id = ClientId::new(1).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        repository
            .add_connection(Connection::new(client_id, Utc::now()))
            .await
            .unwrap();
        pusher.register_client(client_id, tx).await;
        let usecase = HandleCommandUseCase::new(repository.clone(), pusher, Arc::new(scheduler));
        Fixture {
            usecase,
            repository,
            client_id,
            rx,
        }
    }

    fn next_message(rx: &mut mpsc::UnboundedReceiver<String>) -> ServerMessage {
        serde_json::from_str(&rx.try_recv().unwrap()).unwrap()
    }

    fn info(text: &str) -> ServerMessage {
        ServerMessage::Info {
            client_id: 1,
            info: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_start_schedules_data_feed_and_acknowledges() {
        // テスト項目: start で Scheduled に遷移し、"Started" が返る
        // given (前提条件):
        let mut scheduler = MockFeedScheduler::new();
        scheduler.expect_start_data_feed().times(1).return_const(true);
        let mut f = create_fixture(scheduler).await;

        // when (操作):
        let state = f.usecase.execute(&f.client_id, FeedCommand::Start).await;

        // then (期待する結果):
        assert_eq!(state, Ok(DataFeedState::Scheduled));
        assert_eq!(next_message(&mut f.rx), info("Started"));
        let stored = f.repository.get_connection(&f.client_id).await.unwrap();
        assert_eq!(stored.feed, DataFeedState::Scheduled);
    }

    #[tokio::test]
    async fn test_start_twice_arms_timer_once_but_acknowledges_twice() {
        // テスト項目: Scheduled 中の start は no-op だが "Started" は返る
        // given (前提条件):
        let mut scheduler = MockFeedScheduler::new();
        scheduler.expect_start_data_feed().times(1).return_const(true);
        let mut f = create_fixture(scheduler).await;
        f.usecase.execute(&f.client_id, FeedCommand::Start).await.unwrap();

        // when (操作):
        let state = f.usecase.execute(&f.client_id, FeedCommand::Start).await;

        // then (期待する結果):
        assert_eq!(state, Ok(DataFeedState::Scheduled));
        assert_eq!(next_message(&mut f.rx), info("Started"));
        assert_eq!(next_message(&mut f.rx), info("Started"));
    }

    #[tokio::test]
    async fn test_stop_before_start_only_acknowledges() {
        // テスト項目: start 前の stop はタイマーに触れず "Stopped" だけ返る
        // given (前提条件):
        let mut scheduler = MockFeedScheduler::new();
        scheduler.expect_stop_data_feed().never();
        let mut f = create_fixture(scheduler).await;

        // when (操作):
        let state = f.usecase.execute(&f.client_id, FeedCommand::Stop).await;

        // then (期待する結果):
        assert_eq!(state, Ok(DataFeedState::Idle));
        assert_eq!(next_message(&mut f.rx), info("Stopped"));
        assert!(f.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stop_after_start_cancels_data_feed() {
        // テスト項目: start 後の stop でタイマーが取り消され Idle に戻る
        // given (前提条件):
        let mut scheduler = MockFeedScheduler::new();
        scheduler.expect_start_data_feed().times(1).return_const(true);
        scheduler.expect_stop_data_feed().times(1).return_const(true);
        let mut f = create_fixture(scheduler).await;
        f.usecase.execute(&f.client_id, FeedCommand::Start).await.unwrap();

        // when (操作):
        let state = f.usecase.execute(&f.client_id, FeedCommand::Stop).await;

        // then (期待する結果):
        assert_eq!(state, Ok(DataFeedState::Idle));
        assert_eq!(next_message(&mut f.rx), info("Started"));
        assert_eq!(next_message(&mut f.rx), info("Stopped"));
    }

    #[tokio::test]
    async fn test_reject_invalid_reports_error_and_keeps_state() {
        // テスト項目: 不正な入力にはエラーを返し、状態は変わらない
        // given (前提条件):
        let mut f = create_fixture(MockFeedScheduler::new()).await;

        // when (操作):
        let result = f.usecase.reject_invalid(&f.client_id).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            next_message(&mut f.rx),
            ServerMessage::Error {
                client_id: 1,
                error: "Invalid JSON or command".to_string(),
            }
        );
        let stored = f.repository.get_connection(&f.client_id).await.unwrap();
        assert_eq!(stored.feed, DataFeedState::Idle);
    }

    #[tokio::test]
    async fn test_command_for_unknown_connection_fails() {
        // テスト項目: 登録されていない接続へのコマンドはエラー
        // given (前提条件):
        let f = create_fixture(MockFeedScheduler::new()).await;
        let unknown = ClientId::new(42).unwrap();

        // when (操作):
        let result = f.usecase.execute(&unknown, FeedCommand::Start).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CommandError::Repository(
                crate::domain::RepositoryError::ConnectionNotFound(42)
            ))
        );
    }

    #[tokio::test]
    async fn test_push_failure_is_reported() {
        // テスト項目: 応答の送信に失敗した場合は Push エラーになる
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionRepository::new());
        let client_id = ClientId::new(1).unwrap();
        repository
            .add_connection(Connection::new(client_id, Utc::now()))
            .await
            .unwrap();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .returning(|id, _| Err(MessagePushError::ClientNotFound(id.value())));
        let usecase = HandleCommandUseCase::new(
            repository,
            Arc::new(pusher),
            Arc::new(MockFeedScheduler::new()),
        );

        // when (操作):
        let result = usecase.execute(&client_id, FeedCommand::Stop).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CommandError::Push(MessagePushError::ClientNotFound(1)))
        );
    }
}
