//! Common building blocks shared by every predictor engine.
//!
//! This module provides the leaf abstractions of the core:
//! 1. **Counters:** The 2-bit saturating counter stored in every table.
//! 2. **History:** The global history shift register and its mask helper.
//! 3. **Errors:** Configuration and counter decoding errors.

/// Two-bit saturating counter.
pub mod counter;

/// Configuration and counter error types.
pub mod error;

/// Global history register and bit-mask helpers.
pub mod history;

pub use counter::SaturatingCounter;
pub use error::{ConfigError, CounterError};
pub use history::{HistoryRegister, low_mask};
