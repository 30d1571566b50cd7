//! Static Branch Predictor.
//!
//! Implements an "Always Taken" policy for conditional branches. It holds no
//! tables and ignores training.

use super::BranchPredictor;

/// Static Branch Predictor structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    /// Always predicts taken.
    fn predict_branch(&self, _pc: u32) -> bool {
        true
    }

    /// Does not maintain any direction history.
    fn update_branch(&mut self, _pc: u32, _taken: bool) {}
}
