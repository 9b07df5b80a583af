//! Data Transfer Objects (DTOs) for the live-feed server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frames (defined in `livefeed_shared::protocol`)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;

pub use livefeed_shared::protocol as websocket;
