//! Shared library for the Livefeed server and client.
//!
//! Holds the wire protocol spoken over the WebSocket connection plus the
//! logging and time helpers both binaries use.

pub mod logger;
pub mod protocol;
pub mod time;
