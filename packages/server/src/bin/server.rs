//! Live-feed WebSocket server.
//!
//! Sends a timestamp heartbeat to every connection and, on `{"command":"start"}`,
//! batches of random tokens until `{"command":"stop"}`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin livefeed-server
//! cargo run --bin livefeed-server -- --host 0.0.0.0 --port 3001 --heartbeat-ms 500
//! ```

use clap::Parser;

use livefeed_server::{
    app::build_server,
    domain::{
        FeedConfig,
        config::{DEFAULT_DATA_MAX_MS, DEFAULT_DATA_MIN_MS, DEFAULT_HEARTBEAT_MS},
    },
};
use livefeed_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "livefeed-server")]
#[command(about = "WebSocket live-feed server with heartbeat and random data stream", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = 3001)]
    port: u16,

    /// Heartbeat period in milliseconds
    #[arg(long, default_value_t = DEFAULT_HEARTBEAT_MS)]
    heartbeat_ms: u64,

    /// Lower bound (inclusive) of the delay between data batches, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DATA_MIN_MS)]
    data_min_ms: u64,

    /// Upper bound (exclusive) of the delay between data batches, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DATA_MAX_MS)]
    data_max_ms: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let config = match FeedConfig::new(args.heartbeat_ms, args.data_min_ms, args.data_max_ms) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid feed configuration: {}", e);
            std::process::exit(2);
        }
    };

    let server = build_server(config);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
