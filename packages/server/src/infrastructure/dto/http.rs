//! HTTP API response DTOs.

use serde::Serialize;

use crate::domain::DataFeedState;

/// One live connection as reported by `/api/connections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDto {
    pub client_id: u64,
    /// ISO-8601 UTC timestamp
    pub connected_at: String,
    pub feed: DataFeedState,
}

/// Response body of `/api/connections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionListDto {
    pub count: usize,
    pub connections: Vec<ConnectionDto>,
}
