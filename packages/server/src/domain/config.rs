//! Feed timing configuration.

use std::{ops::Range, time::Duration};

use super::error::ConfigError;

/// Default heartbeat period.
pub const DEFAULT_HEARTBEAT_MS: u64 = 1000;
/// Default lower bound (inclusive) of the data-feed delay.
pub const DEFAULT_DATA_MIN_MS: u64 = 500;
/// Default upper bound (exclusive) of the data-feed delay.
pub const DEFAULT_DATA_MAX_MS: u64 = 2500;

/// Timing of the heartbeat and data-feed streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    heartbeat_interval: Duration,
    data_delay_ms: Range<u64>,
}

impl FeedConfig {
    /// Build a validated configuration.
    ///
    /// The data delay is drawn from `[data_min_ms, data_max_ms)`.
    pub fn new(heartbeat_ms: u64, data_min_ms: u64, data_max_ms: u64) -> Result<Self, ConfigError> {
        if heartbeat_ms == 0 {
            return Err(ConfigError::ZeroHeartbeatInterval);
        }
        if data_min_ms >= data_max_ms {
            return Err(ConfigError::EmptyDataDelayRange {
                min_ms: data_min_ms,
                max_ms: data_max_ms,
            });
        }
        Ok(Self {
            heartbeat_interval: Duration::from_millis(heartbeat_ms),
            data_delay_ms: data_min_ms..data_max_ms,
        })
    }

    pub fn heartbeat_interval(&self) -> Duration {
        self.heartbeat_interval
    }

    pub fn data_delay_ms(&self) -> Range<u64> {
        self.data_delay_ms.clone()
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_millis(DEFAULT_HEARTBEAT_MS),
            data_delay_ms: DEFAULT_DATA_MIN_MS..DEFAULT_DATA_MAX_MS,
        }
    }
}
