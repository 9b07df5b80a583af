//! Live-feed client: a connection manager for the live-feed WebSocket
//! server plus the interactive terminal front end built on it.

pub mod connector;
pub mod error;
pub mod formatter;

mod domain;
mod runner;
mod ui;

pub use connector::{LiveFeedConnector, MessageHandler};
pub use error::ClientError;
pub use runner::run_client;
