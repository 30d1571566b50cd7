//! Branch direction predictor core.
//!
//! This crate implements the direction predictors driven by a trace harness:
//! 1. **Common:** The 2-bit saturating counter, the global history register, and error types.
//! 2. **Configuration:** Table geometries per engine, deserializable from JSON.
//! 3. **BRU:** Static, gshare, tournament, and TAGE engines behind one trait.
//! 4. **Facade:** The init / predict / train / cleanup lifecycle seen by the harness.

/// Shared counters, history registers, and errors.
pub mod common;
/// Predictor configuration (defaults, mode enum, per-engine table sizes).
pub mod config;
/// Branch direction predictors and their static-dispatch wrapper.
pub mod bru;
/// Harness-facing lifecycle wrapper.
pub mod facade;

/// Direction predictor trait implemented by every engine.
pub use crate::bru::BranchPredictor;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Harness entry point and the per-branch record it consumes.
pub use crate::facade::{BranchRecord, PredictorFacade};
