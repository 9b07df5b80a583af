//! Message formatting utilities for client display.

use chrono::{DateTime, Utc};
use livefeed_shared::protocol::ServerMessage;

const SEPARATOR: &str = "------------------------------------------------------------";

/// Render an ISO-8601 timestamp as `HH:MM:SS.mmm`, or return it unchanged
/// when it does not parse.
fn format_clock_time(time_stamp: &str) -> String {
    DateTime::parse_from_rfc3339(time_stamp)
        .map(|t| t.with_timezone(&Utc).format("%H:%M:%S%.3f").to_string())
        .unwrap_or_else(|_| time_stamp.to_string())
}

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server frame
    pub fn format_message(message: &ServerMessage) -> String {
        match message {
            ServerMessage::Info { client_id, info } => Self::format_info(*client_id, info),
            ServerMessage::Error { client_id, error } => Self::format_error(*client_id, error),
            ServerMessage::TimeStamp {
                client_id,
                time_stamp,
            } => Self::format_timestamp(*client_id, time_stamp),
            ServerMessage::Data { client_id, data } => Self::format_data(*client_id, data),
        }
    }

    /// Format a command acknowledgement
    ///
    /// # Arguments
    ///
    /// * `client_id` - The connection id assigned by the server
    /// * `info` - The acknowledgement text, e.g. `Started`
    pub fn format_info(client_id: u64, info: &str) -> String {
        format!("\n[#{}] * {}\n", client_id, info)
    }

    /// Format a protocol error reported by the server
    pub fn format_error(client_id: u64, error: &str) -> String {
        format!("\n[#{}] ! {}\n", client_id, error)
    }

    /// Format a heartbeat
    pub fn format_timestamp(client_id: u64, time_stamp: &str) -> String {
        format!(
            "\n[#{}] ♥ {} UTC\n",
            client_id,
            format_clock_time(time_stamp)
        )
    }

    /// Format a data batch, one token per line
    pub fn format_data(client_id: u64, data: &[String]) -> String {
        let mut output = format!("\n[#{}] ← {} token(s)\n", client_id, data.len());
        for token in data {
            output.push_str(&format!("    {}\n", token));
        }
        output
    }

    /// Format a summary of the received message log
    ///
    /// # Arguments
    ///
    /// * `log` - Every message received since the connector was last closed
    ///
    /// # Returns
    ///
    /// A framed block with per-kind counts and the most recent heartbeat
    pub fn format_log_summary(log: &[ServerMessage]) -> String {
        let mut infos = 0;
        let mut errors = 0;
        let mut heartbeats = 0;
        let mut batches = 0;
        let mut tokens = 0;
        let mut last_heartbeat = None;

        for message in log {
            match message {
                ServerMessage::Info { .. } => infos += 1,
                ServerMessage::Error { .. } => errors += 1,
                ServerMessage::TimeStamp { time_stamp, .. } => {
                    heartbeats += 1;
                    last_heartbeat = Some(time_stamp.as_str());
                }
                ServerMessage::Data { data, .. } => {
                    batches += 1;
                    tokens += data.len();
                }
            }
        }

        let mut output = format!("\n{}\n", SEPARATOR);
        output.push_str(&format!("Received {} message(s)\n", log.len()));
        output.push_str(&format!("  info:       {}\n", infos));
        output.push_str(&format!("  error:      {}\n", errors));
        output.push_str(&format!("  heartbeat:  {}\n", heartbeats));
        output.push_str(&format!("  data:       {} ({} tokens)\n", batches, tokens));
        if let Some(time_stamp) = last_heartbeat {
            output.push_str(&format!(
                "Last heartbeat at {} UTC\n",
                format_clock_time(time_stamp)
            ));
        }
        output.push_str(SEPARATOR);
        output.push('\n');
        output
    }

    /// Format an unknown prompt command
    pub fn format_unknown_input(input: &str) -> String {
        format!(
            "Unknown command '{}'. Available: start, stop, log, quit\n",
            input
        )
    }
}
