//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{health_check, list_connections};
pub use websocket::websocket_handler;
