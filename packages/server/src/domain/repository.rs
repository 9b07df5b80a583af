//! Repository trait 定義
//!
//! 接続状態へのデータアクセスのインターフェース。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use async_trait::async_trait;

use super::{ClientId, Connection, RepositoryError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// 接続を追加
    async fn add_connection(&self, connection: Connection) -> Result<(), RepositoryError>;

    /// 接続を削除し、削除した接続を返す
    async fn remove_connection(&self, client_id: &ClientId) -> Result<Connection, RepositoryError>;

    /// 接続を取得
    async fn get_connection(&self, client_id: &ClientId) -> Result<Connection, RepositoryError>;

    /// 既存の接続を上書き保存
    async fn save_connection(&self, connection: Connection) -> Result<(), RepositoryError>;

    /// 全接続を ClientId 順で取得
    async fn get_connections(&self) -> Vec<Connection>;

    /// 接続数を取得
    async fn count_connections(&self) -> usize;
}
