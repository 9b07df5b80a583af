//! Random data-batch generation for the data feed.
//!
//! Tokens are eight base-6 digits rendered with the fixed substitution
//! `0→X 1→a 2→b 3→c 4→d 5→e`.

use std::time::Duration;

use rand::Rng;

use super::{config::FeedConfig, value_object::DataBatch};

/// Length of every token in a batch.
pub const TOKEN_LEN: usize = 8;

/// Substitution applied to base-6 digits, indexed by digit value.
const DIGIT_ALPHABET: [char; 6] = ['X', 'a', 'b', 'c', 'd', 'e'];

/// Produce one token of [`TOKEN_LEN`] characters.
pub fn generate_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..TOKEN_LEN)
        .map(|_| DIGIT_ALPHABET[rng.gen_range(0..DIGIT_ALPHABET.len())])
        .collect()
}

/// Produce a batch of 1 to 4 tokens.
pub fn generate_batch<R: Rng + ?Sized>(rng: &mut R) -> DataBatch {
    let count = rng.gen_range(DataBatch::MIN_TOKENS..=DataBatch::MAX_TOKENS);
    let tokens = (0..count).map(|_| generate_token(rng)).collect();
    // count is drawn from the accepted range
    DataBatch::new(tokens).unwrap_or_else(|_| unreachable!("batch size out of range"))
}

/// Draw the delay before the next batch from the configured range.
pub fn next_data_delay<R: Rng + ?Sized>(rng: &mut R, config: &FeedConfig) -> Duration {
    Duration::from_millis(rng.gen_range(config.data_delay_ms()))
}
