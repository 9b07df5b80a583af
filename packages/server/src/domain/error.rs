//! ドメイン層のエラー型

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("client id must be a positive integer")]
    ZeroClientId,

    #[error("data batch must contain between {min} and {max} tokens, got {actual}")]
    BatchSize {
        min: usize,
        max: usize,
        actual: usize,
    },
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("connection {0} not found")]
    ConnectionNotFound(u64),

    #[error("connection {0} already exists")]
    DuplicateConnection(u64),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client {0} is not registered")]
    ClientNotFound(u64),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// フィード設定のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("heartbeat interval must be greater than zero")]
    ZeroHeartbeatInterval,

    #[error("data delay range is empty: min {min_ms} ms must be below max {max_ms} ms")]
    EmptyDataDelayRange { min_ms: u64, max_ms: u64 },
}
