//! Configuration and counter-state error definitions.
//!
//! This module defines the error values produced by the predictor core. It provides:
//! 1. **Configuration Errors:** Rejection of table geometries that cannot be built.
//! 2. **Counter Errors:** Reporting raw counter encodings outside the 2-bit domain.
//!
//! The predict/train path itself never fails; every error here is raised either
//! while a configuration is parsed and validated or while a raw counter value is
//! decoded.

use thiserror::Error;

/// Errors raised while parsing or validating a predictor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be deserialized.
    #[error("malformed predictor configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A table width (log2 of its entry count) is outside the supported range.
    #[error("{table}: table width of {bits} bits is outside 1..={max}")]
    TableBits {
        /// Name of the offending table.
        table: String,
        /// The configured width.
        bits: usize,
        /// The largest accepted width.
        max: usize,
    },

    /// The TAGE configuration has no tagged tables.
    #[error("TAGE requires at least one tagged table")]
    NoTaggedTables,

    /// Tagged tables must shrink strictly from the first to the last table.
    #[error("{table}: index width of {bits} bits must be smaller than the previous table's {previous}")]
    TableOrder {
        /// Name of the offending table.
        table: String,
        /// The configured width.
        bits: usize,
        /// Width of the preceding table.
        previous: usize,
    },

    /// A tag width is outside the supported range.
    #[error("{table}: tag width of {bits} bits is outside 1..=32")]
    TagBits {
        /// Name of the offending table.
        table: String,
        /// The configured width.
        bits: usize,
    },

    /// A folded history length is outside the width of the history register.
    #[error("{table}: history length of {length} is outside 1..=64")]
    HistoryLength {
        /// Name of the offending table.
        table: String,
        /// The configured length.
        length: usize,
    },

    /// A usefulness reset interval of zero was requested.
    #[error("TAGE usefulness reset interval must be non-zero")]
    ResetInterval,
}

/// Errors raised while decoding a raw saturating counter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CounterError {
    /// The raw value does not name one of the four counter states.
    #[error("counter state {0} is outside the 2-bit domain 0..=3")]
    OutOfRange(u8),
}
