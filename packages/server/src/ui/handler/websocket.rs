//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{domain::ClientId, infrastructure::dto::conversion::parse_command, ui::state::AppState};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards queued frames from `rx` to the WebSocket sink.
///
/// Frames leave in the order they were queued, so each stream of a
/// connection keeps its own order on the wire.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Channel for everything this connection sends (heartbeats, data, acks)
    let (tx, rx) = mpsc::unbounded_channel();

    let client_id = match state.connect_client_usecase.execute(tx).await {
        Ok(connection) => connection.client_id,
        Err(e) => {
            tracing::error!("Failed to register connection: {}", e);
            return;
        }
    };
    tracing::info!("≈ Client {} connected", client_id);

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    // Transport errors end the connection like a normal close
                    tracing::debug!("WebSocket error on client {}: {}", client_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => handle_frame(&state_clone, &client_id, text.as_str()).await,
                Message::Binary(bytes) => {
                    handle_frame(&state_clone, &client_id, &String::from_utf8_lossy(&bytes)).await
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping from client {}", client_id);
                }
                Message::Close(_) => {
                    tracing::debug!("Client {} requested close", client_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other and wait for it to
    // stop so no command can arm a timer once cleanup has started
    let remaining = tokio::select! {
        _ = &mut recv_task => send_task,
        _ = &mut send_task => recv_task,
    };
    remaining.abort();
    let _ = remaining.await;

    match state.disconnect_client_usecase.execute(&client_id).await {
        Ok(_) => tracing::info!("≠ Client {} disconnected", client_id),
        Err(e) => tracing::warn!("Failed to release client {}: {}", client_id, e),
    }
}

/// Handle one inbound frame. Malformed input is reported, never fatal.
async fn handle_frame(state: &AppState, client_id: &ClientId, raw: &str) {
    tracing::debug!("↙ client {}: {}", client_id, raw);

    let result = match parse_command(raw) {
        Ok(command) => state
            .handle_command_usecase
            .execute(client_id, command)
            .await
            .map(|_| ()),
        Err(e) => {
            tracing::warn!("Client {} sent an invalid frame: {}", client_id, e);
            state.handle_command_usecase.reject_invalid(client_id).await
        }
    };

    if let Err(e) = result {
        tracing::warn!("Failed to handle frame from client {}: {}", client_id, e);
    }
}
