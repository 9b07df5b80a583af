//! Interactive live-feed client.
//!
//! Connects to a live-feed server, prints every heartbeat, acknowledgement and
//! data batch, and forwards `start` / `stop` typed at the prompt. `log` prints
//! a summary of everything received so far and `quit` leaves. The client exits
//! when the server closes the connection; it does not reconnect.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin livefeed-client
//! cargo run --bin livefeed-client -- --url ws://127.0.0.1:3001/ws --auto-start
//! ```

use clap::Parser;

use livefeed_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "livefeed-client")]
#[command(about = "Interactive client for the live-feed WebSocket server", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3001/ws")]
    url: String,

    /// Send `start` right after connecting
    #[arg(short = 's', long)]
    auto_start: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = livefeed_client::run_client(args.url, args.auto_start).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
