//! Interactive client session.
//!
//! Connects once and never reconnects: when the server closes the socket the
//! session ends.

use std::sync::Arc;

use livefeed_shared::protocol::{FeedCommand, ServerMessage};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{
    connector::LiveFeedConnector,
    domain::{UserInput, parse_input},
    formatter::MessageFormatter,
    ui::{PROMPT, redisplay_prompt},
};

/// Run the interactive live-feed client
pub async fn run_client(url: String, auto_start: bool) -> Result<(), Box<dyn std::error::Error>> {
    let connector = LiveFeedConnector::new(url);
    connector.on_message(Arc::new(|message: &ServerMessage, _log: &[ServerMessage]| {
        print!("{}", MessageFormatter::format_message(message));
        redisplay_prompt();
    }));

    connector.connect().await?;
    println!("\nCommands: start, stop, log, quit. Press Ctrl+C to exit.\n");

    if auto_start {
        connector.send_command(FeedCommand::Start).await?;
    }

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // rustyline is blocking, so it gets its own thread
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    let closed = connector.wait_closed();
    tokio::pin!(closed);

    loop {
        tokio::select! {
            _ = &mut closed => {
                tracing::info!("Connection closed by server, exiting");
                break;
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    break;
                };
                match parse_input(&line) {
                    UserInput::Command(command) => connector.send_command(command).await?,
                    UserInput::Log => {
                        print!("{}", MessageFormatter::format_log_summary(&connector.messages()));
                        redisplay_prompt();
                    }
                    UserInput::Quit => break,
                    UserInput::Unknown(input) => {
                        print!("{}", MessageFormatter::format_unknown_input(&input));
                        redisplay_prompt();
                    }
                }
            }
        }
    }

    connector.close().await;
    Ok(())
}
