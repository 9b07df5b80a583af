//! Wire protocol between the live-feed server and its clients.
//!
//! Every frame is a single JSON object sent as a WebSocket text message.
//! Server frames carry the connection's `clientId` next to exactly one
//! payload key (`info`, `error`, `timeStamp` or `data`); there is no type tag.
//! Client frames are `{"command": "start"}` or `{"command": "stop"}`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Acknowledgement sent after a `start` command.
pub const STARTED_INFO: &str = "Started";
/// Acknowledgement sent after a `stop` command.
pub const STOPPED_INFO: &str = "Stopped";
/// Error sent for any frame that is not a recognized command.
pub const INVALID_COMMAND_ERROR: &str = "Invalid JSON or command";

/// Frames sent from the server to a connected client.
///
/// Deserialization selects the variant by the payload key present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    /// Acknowledgement of a recognized command.
    Info {
        #[serde(rename = "clientId")]
        client_id: u64,
        info: String,
    },
    /// Report of a malformed or unrecognized client frame.
    Error {
        #[serde(rename = "clientId")]
        client_id: u64,
        error: String,
    },
    /// Heartbeat carrying an ISO-8601 UTC timestamp.
    TimeStamp {
        #[serde(rename = "clientId")]
        client_id: u64,
        #[serde(rename = "timeStamp")]
        time_stamp: String,
    },
    /// One batch of the data feed.
    Data {
        #[serde(rename = "clientId")]
        client_id: u64,
        data: Vec<String>,
    },
}

impl ServerMessage {
    /// Identifier of the connection that emitted this frame.
    pub fn client_id(&self) -> u64 {
        match self {
            Self::Info { client_id, .. }
            | Self::Error { client_id, .. }
            | Self::TimeStamp { client_id, .. }
            | Self::Data { client_id, .. } => *client_id,
        }
    }
}

/// Data-feed control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedCommand {
    Start,
    Stop,
}

impl fmt::Display for FeedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Stop => f.write_str("stop"),
        }
    }
}

/// Frame sent from a client to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCommand {
    pub command: FeedCommand,
}

impl ClientCommand {
    pub fn new(command: FeedCommand) -> Self {
        Self { command }
    }
}
