//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction prediction algorithms: static
//! prediction, gshare, a tournament predictor, and a simplified TAGE.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait and common functionality.
pub mod branch_predictor;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Static branch predictor (always taken).
pub mod static_bp;

/// Tagged Geometric History Length branch predictor.
pub mod tage;

/// Tournament branch predictor (combines local and global predictors).
pub mod tournament;

use self::{
    gshare::GSharePredictor, static_bp::StaticPredictor, tage::TagePredictor,
    tournament::TournamentPredictor,
};
use crate::config::{BranchPredictor as BpType, Config};

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups on the per-branch path.
#[derive(Debug, Clone)]
pub enum BranchPredictorWrapper {
    /// Always-taken predictor.
    Static(StaticPredictor),
    /// gshare predictor.
    GShare(GSharePredictor),
    /// Tournament predictor.
    Tournament(TournamentPredictor),
    /// TAGE predictor.
    Tage(TagePredictor),
    /// Unrecognized mode: predicts not-taken and never trains.
    Unsupported,
}

impl BranchPredictorWrapper {
    /// Creates a new branch predictor wrapper based on configuration.
    ///
    /// Selects the algorithm named by `config.branch_predictor` and sizes
    /// its tables from the matching sub-configuration.
    pub fn new(config: &Config) -> Self {
        match config.branch_predictor {
            BpType::Static => Self::Static(StaticPredictor::new()),
            BpType::GShare => Self::GShare(GSharePredictor::new(&config.gshare)),
            BpType::Tournament => {
                Self::Tournament(TournamentPredictor::new(&config.tournament))
            }
            BpType::Tage => Self::Tage(TagePredictor::new(&config.tage)),
            BpType::Unknown => Self::Unsupported,
        }
    }

    /// Returns the mode this wrapper was built for.
    pub const fn mode(&self) -> BpType {
        match self {
            Self::Static(_) => BpType::Static,
            Self::GShare(_) => BpType::GShare,
            Self::Tournament(_) => BpType::Tournament,
            Self::Tage(_) => BpType::Tage,
            Self::Unsupported => BpType::Unknown,
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    /// Predicts whether a branch at the given PC will be taken.
    #[inline(always)]
    fn predict_branch(&self, pc: u32) -> bool {
        match self {
            Self::Static(bp) => bp.predict_branch(pc),
            Self::GShare(bp) => bp.predict_branch(pc),
            Self::Tournament(bp) => bp.predict_branch(pc),
            Self::Tage(bp) => bp.predict_branch(pc),
            Self::Unsupported => false,
        }
    }

    /// Updates the branch predictor with the actual outcome of a branch.
    ///
    /// Called after branch resolution to train the predictor and advance
    /// its history.
    #[inline(always)]
    fn update_branch(&mut self, pc: u32, taken: bool) {
        match self {
            Self::Static(bp) => bp.update_branch(pc, taken),
            Self::GShare(bp) => bp.update_branch(pc, taken),
            Self::Tournament(bp) => bp.update_branch(pc, taken),
            Self::Tage(bp) => bp.update_branch(pc, taken),
            Self::Unsupported => {}
        }
    }
}
