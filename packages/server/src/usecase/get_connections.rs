//! UseCase: 接続一覧の取得

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRepository};

/// 接続一覧取得のユースケース
pub struct GetConnectionsUseCase {
    repository: Arc<dyn ConnectionRepository>,
}

impl GetConnectionsUseCase {
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// 接続中の一覧を ClientId 順で返す
    pub async fn execute(&self) -> Vec<Connection> {
        self.repository.get_connections().await
    }
}
