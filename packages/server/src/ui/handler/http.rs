//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ConnectionDto, ConnectionListDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List live connections with their data-feed state
pub async fn list_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionListDto> {
    let connections: Vec<ConnectionDto> = state
        .get_connections_usecase
        .execute()
        .await
        .into_iter()
        .map(ConnectionDto::from)
        .collect();

    Json(ConnectionListDto {
        count: connections.len(),
        connections,
    })
}
