//! Logging setup utilities for the Livefeed binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the shared crate and the binary's own package. `RUST_LOG` overrides it entirely when set.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "livefeed_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use livefeed_shared::logger::setup_logger;
///
/// setup_logger("livefeed-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// Binaries share their package name, so the binary target also covers the
/// package's library code.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level
    )
}
