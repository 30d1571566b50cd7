//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that all direction
//! predictors implement. The harness drives it as a strict alternation of
//! one `predict_branch` and one `update_branch` per conditional branch, in
//! program order.

/// Trait for branch direction prediction algorithms.
pub trait BranchPredictor {
    /// Predicts whether the conditional branch at `pc` will be taken.
    ///
    /// Prediction never mutates history or tables, so repeated calls
    /// without an intervening update return the same answer.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    fn predict_branch(&self, pc: u32) -> bool;

    /// Trains the predictor with the resolved outcome of the branch at `pc`.
    ///
    /// Must be called exactly once after the matching `predict_branch`,
    /// before the next branch is predicted.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    fn update_branch(&mut self, pc: u32, taken: bool);
}
