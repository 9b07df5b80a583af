//! Conversion logic between DTOs and domain entities.

use livefeed_shared::{
    protocol::{ClientCommand, FeedCommand},
    time::to_iso8601,
};
use thiserror::Error;

use crate::domain::{ClientId, Connection, FeedEvent};
use crate::infrastructure::dto::{http, websocket as dto};

/// Raw client frame that is not a recognized command.
#[derive(Debug, Error)]
#[error("invalid command frame: {0}")]
pub struct InvalidCommand(#[from] serde_json::Error);

// ========================================
// DTO → Domain
// ========================================

/// Parse a raw text frame into a data-feed command.
pub fn parse_command(raw: &str) -> Result<FeedCommand, InvalidCommand> {
    let frame: ClientCommand = serde_json::from_str(raw)?;
    Ok(frame.command)
}

// ========================================
// Domain → DTO
// ========================================

/// Attach the sending connection's id to a domain event.
pub fn to_server_message(client_id: &ClientId, event: FeedEvent) -> dto::ServerMessage {
    let client_id = client_id.value();
    match event {
        FeedEvent::Info(info) => dto::ServerMessage::Info { client_id, info },
        FeedEvent::Error(error) => dto::ServerMessage::Error { client_id, error },
        FeedEvent::TimeStamp(at) => dto::ServerMessage::TimeStamp {
            client_id,
            time_stamp: to_iso8601(&at),
        },
        FeedEvent::Data(batch) => dto::ServerMessage::Data {
            client_id,
            data: batch.into_tokens(),
        },
    }
}

impl From<Connection> for http::ConnectionDto {
    fn from(model: Connection) -> Self {
        Self {
            client_id: model.client_id.value(),
            connected_at: to_iso8601(&model.connected_at),
            feed: model.feed,
        }
    }
}
