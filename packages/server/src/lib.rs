//! Live-feed WebSocket server.
//!
//! Every connection receives a heartbeat timestamp once per period and, after
//! a `start` command, batches of random tokens at random intervals until
//! `stop`. The crate is layered as domain / usecase / infrastructure / ui,
//! with `app` wiring the default implementations together.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// composition root
pub mod app;
