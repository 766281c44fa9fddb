//! Soft heap configuration
//!
//! A soft heap is tuned by two numbers:
//!
//! - `epsilon` (ε): the corruption rate. At most ε·n of the elements held by a
//!   heap that has seen n inserts carry a common key larger than their own.
//! - `rank_slack` (c): a small constant added to `log₂(1/ε)` to form the rank
//!   threshold `r`. Nodes of rank at most `r` hold exactly one element.
//!
//! The defaults (ε = 1/3, c = 5) follow Kaplan and Zwick.

use crate::rank::{self, Rank};
use std::fmt;

/// Default corruption rate.
pub const DEFAULT_EPSILON: f64 = 1.0 / 3.0;

/// Default slack added to `ceil(log₂(1/ε))`.
pub const DEFAULT_RANK_SLACK: Rank = 5;

/// Error returned when a configuration value is out of range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// ε must be a finite number in `(0, 1]`
    InvalidEpsilon(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEpsilon(epsilon) => {
                write!(f, "epsilon must be in (0, 1], got {epsilon}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tuning parameters for a [`SoftHeap`](crate::soft::SoftHeap)
///
/// # Example
///
/// ```rust
/// use soft_heap::config::Config;
///
/// let config = Config::new(0.1).unwrap().with_rank_slack(4);
/// assert_eq!(config.threshold(), 8);
/// assert!(Config::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    epsilon: f64,
    rank_slack: Rank,
}

impl Config {
    /// Creates a configuration with the given corruption rate and the
    /// default rank slack.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidEpsilon`] unless `0 < epsilon <= 1`.
    pub fn new(epsilon: f64) -> Result<Self, ConfigError> {
        if !epsilon.is_finite() || epsilon <= 0.0 || epsilon > 1.0 {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }
        Ok(Self {
            epsilon,
            rank_slack: DEFAULT_RANK_SLACK,
        })
    }

    /// Replaces the rank slack `c`.
    pub fn with_rank_slack(mut self, rank_slack: Rank) -> Self {
        self.rank_slack = rank_slack;
        self
    }

    /// The corruption rate ε
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The rank slack `c`
    pub fn rank_slack(&self) -> Rank {
        self.rank_slack
    }

    /// The rank threshold `r = ceil(log₂(1/ε)) + c`.
    pub fn threshold(&self) -> Rank {
        rank::threshold(self.epsilon, self.rank_slack)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            rank_slack: DEFAULT_RANK_SLACK,
        }
    }
}
