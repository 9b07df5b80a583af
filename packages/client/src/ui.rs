//! UI utilities for the client.

use std::io::Write;

/// Prompt shown by the interactive reader
pub const PROMPT: &str = "> ";

/// Redisplay the prompt after printing a message
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}
