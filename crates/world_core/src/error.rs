//! Startup-time configuration errors.
//!
//! Only configuration loading may fail; every per-query path in the
//! generation and mechanics crates clamps bad input instead of erroring.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("galaxy seed must not be empty")]
    EmptySeed,

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("{field} has an inverted range (min > max)")]
    InvertedRange { field: &'static str },

    #[error("catalog '{name}' must not be empty")]
    EmptyCatalog { name: &'static str },

    #[error("catalog '{name}' has no positive weights")]
    BadWeights { name: &'static str },

    #[error("danger zone thresholds must be strictly increasing")]
    UnorderedZones,

    #[error("could not parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
