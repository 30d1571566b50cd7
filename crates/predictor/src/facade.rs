//! Harness-facing predictor lifecycle.
//!
//! A trace-driven harness talks to the core through [`PredictorFacade`]:
//! `init` once, then `make_prediction` / `train_predictor` for every branch
//! in program order, then `cleanup`. Only conditional branches reach the
//! engine; the remaining [`BranchRecord`] fields are carried so the harness
//! can hand over whatever its trace format provides.

use tracing::{debug, warn};

use crate::bru::{BranchPredictor, BranchPredictorWrapper};
use crate::common::error::ConfigError;
use crate::config::{BranchPredictor as BpType, Config};

/// One resolved branch as reported by the harness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchRecord {
    /// Program counter of the branch.
    pub pc: u32,
    /// Resolved target address.
    pub target: u32,
    /// Actual direction.
    pub taken: bool,
    /// Conditional branches are the only ones used for training.
    pub is_conditional: bool,
    /// Call instruction.
    pub is_call: bool,
    /// Return instruction.
    pub is_return: bool,
    /// Direct (PC-relative) branch.
    pub is_direct: bool,
}

impl BranchRecord {
    /// Creates a direct conditional branch record with no target.
    pub const fn conditional(pc: u32, taken: bool) -> Self {
        Self {
            pc,
            target: 0,
            taken,
            is_conditional: true,
            is_call: false,
            is_return: false,
            is_direct: true,
        }
    }
}

/// Lifecycle wrapper around one predictor engine.
#[derive(Debug, Clone)]
pub struct PredictorFacade {
    config: Config,
    engine: Option<BranchPredictorWrapper>,
}

impl PredictorFacade {
    /// Validates `config` and returns an uninitialized facade.
    ///
    /// No tables are allocated until [`PredictorFacade::init`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] reported by [`Config::validate`].
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            engine: None,
        })
    }

    /// Builds the engine selected by the configuration.
    ///
    /// Calling this again discards everything learned so far.
    pub fn init(&mut self) {
        let mode = self.config.branch_predictor;
        match mode {
            BpType::Static => debug!(mode = %mode, "initializing static predictor"),
            BpType::GShare => debug!(
                mode = %mode,
                history_bits = self.config.gshare.history_bits,
                "initializing gshare predictor"
            ),
            BpType::Tournament => {
                let t = &self.config.tournament;
                debug!(
                    mode = %mode,
                    local_hist_bits = t.local_hist_bits,
                    local_pred_bits = t.local_pred_bits,
                    global_pred_bits = t.global_pred_bits,
                    chooser_bits = t.chooser_bits,
                    "initializing tournament predictor"
                );
            }
            BpType::Tage => debug!(
                mode = %mode,
                bimodal_bits = self.config.tage.bimodal_bits,
                tables = self.config.tage.tables.len(),
                "initializing TAGE predictor"
            ),
            BpType::Unknown => {
                warn!("unrecognized branch predictor mode; predicting not-taken");
            }
        }
        self.engine = Some(BranchPredictorWrapper::new(&self.config));
    }

    /// Predicts the direction of the branch at `pc`.
    ///
    /// `target` and `is_direct` are accepted for harness compatibility and
    /// ignored. Predicts not-taken when no engine is initialized.
    pub fn make_prediction(&self, pc: u32, _target: u32, _is_direct: bool) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|engine| engine.predict_branch(pc))
    }

    /// Trains the engine with a resolved branch.
    ///
    /// Records for non-conditional branches, and any record arriving while
    /// no engine is initialized, are ignored.
    pub fn train_predictor(&mut self, record: &BranchRecord) {
        if !record.is_conditional {
            return;
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.update_branch(record.pc, record.taken);
        }
    }

    /// Drops the engine and its tables.
    pub fn cleanup(&mut self) {
        if self.engine.take().is_some() {
            debug!(mode = %self.config.branch_predictor, "predictor tables released");
        }
    }

    /// Returns the configured mode.
    pub const fn mode(&self) -> BpType {
        self.config.branch_predictor
    }

    /// Returns true between `init` and `cleanup`.
    pub const fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the live engine, if any.
    pub const fn engine(&self) -> Option<&BranchPredictorWrapper> {
        self.engine.as_ref()
    }
}
