//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("failed to register connection: {0}")]
    Repository(#[from] RepositoryError),
}

/// コマンド処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("connection state unavailable: {0}")]
    Repository(#[from] RepositoryError),

    #[error("failed to acknowledge command: {0}")]
    Push(#[from] MessagePushError),
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("failed to release connection: {0}")]
    Repository(#[from] RepositoryError),
}
