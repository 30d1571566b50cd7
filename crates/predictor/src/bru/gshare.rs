//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^N) where N is the history width (17 bits = 128K counters by default)
//! - **Hardware Cost:** Moderate - single table lookup, XOR, and counter update
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use super::BranchPredictor;
use crate::common::{HistoryRegister, SaturatingCounter, low_mask};
use crate::config::GShareConfig;

/// GShare Predictor structure.
#[derive(Debug, Clone)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: HistoryRegister,
    /// Branch History Table of 2-bit saturating counters.
    bht: Vec<SaturatingCounter>,
    /// Number of history (and PC) bits forming the index.
    history_bits: usize,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor with `2^history_bits` counters, all weakly not-taken.
    pub fn new(config: &GShareConfig) -> Self {
        Self {
            ghr: HistoryRegister::new(),
            bht: vec![SaturatingCounter::default(); 1 << config.history_bits],
            history_bits: config.history_bits,
        }
    }

    /// Calculates the index into the Branch History Table.
    ///
    /// Computes the XOR of the low PC bits and the low history bits.
    pub const fn index(&self, pc: u32) -> usize {
        let mask = low_mask(self.history_bits);
        let pc_part = (pc as u64) & mask;
        let ghr_part = self.ghr.low(self.history_bits);
        (pc_part ^ ghr_part) as usize
    }

    /// Returns the counter that would predict the branch at `pc`.
    pub fn counter(&self, pc: u32) -> SaturatingCounter {
        self.bht[self.index(pc)]
    }

    /// Returns the global history register.
    pub const fn history(&self) -> HistoryRegister {
        self.ghr
    }

    /// Returns the number of counters in the table.
    pub const fn size(&self) -> usize {
        self.bht.len()
    }
}

impl BranchPredictor for GSharePredictor {
    /// Predicts taken if the counter at the hashed index is weakly or strongly taken.
    #[inline(always)]
    fn predict_branch(&self, pc: u32) -> bool {
        self.counter(pc).is_taken()
    }

    /// Updates the counter at the hashed index, then shifts the outcome into
    /// the Global History Register.
    #[inline(always)]
    fn update_branch(&mut self, pc: u32, taken: bool) {
        let idx = self.index(pc);
        self.bht[idx].train(taken);
        self.ghr.push(taken);
    }
}
