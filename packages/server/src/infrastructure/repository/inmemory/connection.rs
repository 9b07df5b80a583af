//! インメモリの ConnectionRepository 実装
//!
//! プロセス再起動で失われる。永続化はしない。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientId, Connection, ConnectionRepository, RepositoryError};

/// 接続状態を HashMap で保持する Repository
#[derive(Debug, Default)]
pub struct InMemoryConnectionRepository {
    connections: Mutex<HashMap<ClientId, Connection>>,
}

impl InMemoryConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn add_connection(&self, connection: Connection) -> Result<(), RepositoryError> {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(&connection.client_id) {
            return Err(RepositoryError::DuplicateConnection(
                connection.client_id.value(),
            ));
        }
        tracing::debug!("Connection {} added to repository", connection.client_id);
        connections.insert(connection.client_id, connection);
        Ok(())
    }

    async fn remove_connection(&self, client_id: &ClientId) -> Result<Connection, RepositoryError> {
        let mut connections = self.connections.lock().await;
        let removed = connections
            .remove(client_id)
            .ok_or(RepositoryError::ConnectionNotFound(client_id.value()))?;
        tracing::debug!("Connection {} removed from repository", client_id);
        Ok(removed)
    }

    async fn get_connection(&self, client_id: &ClientId) -> Result<Connection, RepositoryError> {
        let connections = self.connections.lock().await;
        connections
            .get(client_id)
            .cloned()
            .ok_or(RepositoryError::ConnectionNotFound(client_id.value()))
    }

    async fn save_connection(&self, connection: Connection) -> Result<(), RepositoryError> {
        let mut connections = self.connections.lock().await;
        match connections.get_mut(&connection.client_id) {
            Some(slot) => {
                *slot = connection;
                Ok(())
            }
            None => Err(RepositoryError::ConnectionNotFound(
                connection.client_id.value(),
            )),
        }
    }

    async fn get_connections(&self) -> Vec<Connection> {
        let connections = self.connections.lock().await;
        let mut list: Vec<Connection> = connections.values().cloned().collect();
        list.sort_by_key(|c| c.client_id);
        list
    }

    async fn count_connections(&self) -> usize {
        self.connections.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn connection(id: u64) -> Connection {
        Connection::new(ClientId::new(id).unwrap(), Utc::now())
    }

    #[tokio::test]
    async fn test_add_and_get_connection() {
        // テスト項目: 追加した接続を取得できる
        // given (前提条件):
        let repository = InMemoryConnectionRepository::new();

        // when (操作):
        repository.add_connection(connection(1)).await.unwrap();
        let result = repository.get_connection(&ClientId::new(1).unwrap()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap().client_id.value(), 1);
        assert_eq!(repository.count_connections().await, 1);
    }

    #[tokio::test]
    async fn test_add_duplicate_connection_fails() {
        // テスト項目: 同じ ClientId の接続を二重に追加するとエラー
        // given (前提条件):
        let repository = InMemoryConnectionRepository::new();
        repository.add_connection(connection(1)).await.unwrap();

        // when (操作):
        let result = repository.add_connection(connection(1)).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::DuplicateConnection(1)));
    }

    #[tokio::test]
    async fn test_save_connection_updates_feed_state() {
        // テスト項目: save_connection で状態が上書きされる
        // given (前提条件):
        let repository = InMemoryConnectionRepository::new();
        let mut conn = connection(2);
        repository.add_connection(conn.clone()).await.unwrap();

        // when (操作):
        conn.start_feed();
        repository.save_connection(conn.clone()).await.unwrap();

        // then (期待する結果):
        let stored = repository.get_connection(&conn.client_id).await.unwrap();
        assert_eq!(stored, conn);
    }

    #[tokio::test]
    async fn test_save_unknown_connection_fails() {
        // テスト項目: 存在しない接続の保存はエラー
        // given (前提条件):
        let repository = InMemoryConnectionRepository::new();

        // when (操作):
        let result = repository.save_connection(connection(9)).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::ConnectionNotFound(9)));
    }

    #[tokio::test]
    async fn test_remove_connection() {
        // テスト項目: 削除した接続は取得できなくなり、二重削除はエラー
        // given (前提条件):
        let repository = InMemoryConnectionRepository::new();
        repository.add_connection(connection(3)).await.unwrap();
        let id = ClientId::new(3).unwrap();

        // when (操作):
        let removed = repository.remove_connection(&id).await;
        let again = repository.remove_connection(&id).await;

        // then (期待する結果):
        assert!(removed.is_ok());
        assert_eq!(again, Err(RepositoryError::ConnectionNotFound(3)));
        assert_eq!(repository.count_connections().await, 0);
    }

    #[tokio::test]
    async fn test_get_connections_sorted_by_client_id() {
        // テスト項目: 接続一覧は ClientId 順に並ぶ
        // given (前提条件):
        let repository = InMemoryConnectionRepository::new();
        for id in [3, 1, 2] {
            repository.add_connection(connection(id)).await.unwrap();
        }

        // when (操作):
        let list = repository.get_connections().await;

        // then (期待する結果):
        let ids: Vec<u64> = list.iter().map(|c| c.client_id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
