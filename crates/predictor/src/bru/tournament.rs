//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a meta-predictor (chooser) to select
//! between a Global predictor (GShare-like) and a Local predictor (PAg).
//! Both components are trained on every branch, so the one the chooser is
//! not trusting keeps tracking the branch and can be selected again later.

use super::BranchPredictor;
use crate::common::{HistoryRegister, SaturatingCounter, low_mask};
use crate::config::TournamentConfig;

/// Chooser state: which component to trust for a history context.
///
/// A 4-state saturating machine. The weak states are the pivot: one
/// disagreement won by the other side flips the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice {
    /// Trust the global component; two local wins needed to flip.
    StronglyGlobal,
    /// Trust the global component; one local win flips.
    #[default]
    WeaklyGlobal,
    /// Trust the local component; one global win flips.
    WeaklyLocal,
    /// Trust the local component; two global wins needed to flip.
    StronglyLocal,
}

impl Choice {
    /// Returns true if the global component provides the prediction.
    #[inline(always)]
    pub const fn prefers_global(self) -> bool {
        matches!(self, Self::StronglyGlobal | Self::WeaklyGlobal)
    }

    /// Moves one step toward [`Choice::StronglyGlobal`].
    pub const fn toward_global(self) -> Self {
        match self {
            Self::StronglyGlobal | Self::WeaklyGlobal => Self::StronglyGlobal,
            Self::WeaklyLocal => Self::WeaklyGlobal,
            Self::StronglyLocal => Self::WeaklyLocal,
        }
    }

    /// Moves one step toward [`Choice::StronglyLocal`].
    pub const fn toward_local(self) -> Self {
        match self {
            Self::StronglyGlobal => Self::WeaklyGlobal,
            Self::WeaklyGlobal => Self::WeaklyLocal,
            Self::WeaklyLocal | Self::StronglyLocal => Self::StronglyLocal,
        }
    }
}

/// Tournament Predictor structure.
#[derive(Debug, Clone)]
pub struct TournamentPredictor {
    /// Global History Register.
    ghr: HistoryRegister,

    /// Global Pattern History Table (2-bit counters).
    global_pht: Vec<SaturatingCounter>,
    /// Number of bits indexing the global PHT.
    global_bits: usize,

    /// Local History Table storing history patterns per branch.
    local_history_table: Vec<u64>,
    /// Number of PC bits indexing the Local History Table.
    local_hist_bits: usize,

    /// Local Pattern History Table indexed by local history patterns.
    local_pht: Vec<SaturatingCounter>,
    /// Number of local history bits indexing the Local PHT.
    local_pred_bits: usize,

    /// Chooser table indexed by global history.
    choice_pht: Vec<Choice>,
    /// Number of history bits indexing the chooser.
    chooser_bits: usize,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor based on the provided configuration.
    ///
    /// Counters start weakly not-taken, local histories empty, and every
    /// chooser entry weakly favors the global component.
    pub fn new(config: &TournamentConfig) -> Self {
        Self {
            ghr: HistoryRegister::new(),

            global_pht: vec![SaturatingCounter::default(); 1 << config.global_pred_bits],
            global_bits: config.global_pred_bits,

            local_history_table: vec![0; 1 << config.local_hist_bits],
            local_hist_bits: config.local_hist_bits,

            local_pht: vec![SaturatingCounter::default(); 1 << config.local_pred_bits],
            local_pred_bits: config.local_pred_bits,

            choice_pht: vec![Choice::default(); 1 << config.chooser_bits],
            chooser_bits: config.chooser_bits,
        }
    }

    /// Index of the local history entry owned by `pc`.
    #[inline(always)]
    const fn local_history_index(&self, pc: u32) -> usize {
        ((pc as u64) & low_mask(self.local_hist_bits)) as usize
    }

    /// Index into the Local PHT, formed from the branch's own history.
    #[inline(always)]
    pub fn local_index(&self, pc: u32) -> usize {
        let pattern = self.local_history_table[self.local_history_index(pc)];
        (pattern & low_mask(self.local_pred_bits)) as usize
    }

    /// Index into the Global PHT: PC XOR global history.
    #[inline(always)]
    pub const fn global_index(&self, pc: u32) -> usize {
        ((self.ghr.value() ^ pc as u64) & low_mask(self.global_bits)) as usize
    }

    /// Index into the chooser: global history only.
    #[inline(always)]
    pub const fn chooser_index(&self) -> usize {
        self.ghr.low(self.chooser_bits) as usize
    }

    /// Returns the local component's counter for `pc`.
    pub fn local_counter(&self, pc: u32) -> SaturatingCounter {
        self.local_pht[self.local_index(pc)]
    }

    /// Returns the global component's counter for `pc`.
    pub fn global_counter(&self, pc: u32) -> SaturatingCounter {
        self.global_pht[self.global_index(pc)]
    }

    /// Returns the chooser state consulted for the next prediction.
    pub fn choice(&self) -> Choice {
        self.choice_pht[self.chooser_index()]
    }

    /// Returns the local history recorded for `pc`.
    pub fn local_history(&self, pc: u32) -> u64 {
        self.local_history_table[self.local_history_index(pc)]
    }

    /// Returns the global history register.
    pub const fn history(&self) -> HistoryRegister {
        self.ghr
    }

    /// Returns the Local PHT.
    pub fn local_table(&self) -> &[SaturatingCounter] {
        &self.local_pht
    }

    /// Returns the Global PHT.
    pub fn global_table(&self) -> &[SaturatingCounter] {
        &self.global_pht
    }

    /// Returns the chooser table.
    pub fn chooser_table(&self) -> &[Choice] {
        &self.choice_pht
    }
}

impl BranchPredictor for TournamentPredictor {
    /// Predicts branch direction.
    ///
    /// Consults the chooser and returns the direction of exactly one of the
    /// two components.
    fn predict_branch(&self, pc: u32) -> bool {
        if self.choice().prefers_global() {
            self.global_counter(pc).is_taken()
        } else {
            self.local_counter(pc).is_taken()
        }
    }

    /// Updates the predictor with the actual branch outcome.
    ///
    /// Moves the chooser toward whichever component was right when they
    /// disagree, trains both components, then updates both histories.
    fn update_branch(&mut self, pc: u32, taken: bool) {
        let l_idx = self.local_index(pc);
        let g_idx = self.global_index(pc);
        let c_idx = self.chooser_index();

        let local_pred = self.local_pht[l_idx].is_taken();
        let global_pred = self.global_pht[g_idx].is_taken();

        if local_pred != global_pred {
            let choice = &mut self.choice_pht[c_idx];
            *choice = if global_pred == taken {
                choice.toward_global()
            } else {
                choice.toward_local()
            };
        }

        self.local_pht[l_idx].train(taken);
        self.global_pht[g_idx].train(taken);

        self.ghr.push(taken);
        let lh_idx = self.local_history_index(pc);
        let pattern = self.local_history_table[lh_idx];
        self.local_history_table[lh_idx] =
            ((pattern << 1) | (taken as u64)) & low_mask(self.local_pred_bits);
    }
}
