//! Pure interpretation of what the user types at the prompt.

use livefeed_shared::protocol::FeedCommand;

/// A line typed at the interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Forward a feed command to the server
    Command(FeedCommand),
    /// Print a summary of the received messages
    Log,
    /// Leave the client
    Quit,
    /// Anything else, kept for the error hint
    Unknown(String),
}

/// Parse one prompt line; matching ignores case and surrounding whitespace
pub fn parse_input(line: &str) -> UserInput {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "start" => UserInput::Command(FeedCommand::Start),
        "stop" => UserInput::Command(FeedCommand::Stop),
        "log" => UserInput::Log,
        "quit" | "exit" => UserInput::Quit,
        _ => UserInput::Unknown(trimmed.to_string()),
    }
}
