//! Configuration system for the branch predictor core.
//!
//! This module defines all configuration structures and enums used to size
//! the predictor tables. It provides:
//! 1. **Defaults:** Baseline table widths for every engine.
//! 2. **Structures:** One config struct per engine plus the root [`Config`].
//! 3. **Enums:** The predictor mode selected by the harness.
//! 4. **Validation:** Rejection of geometries that cannot be allocated.
//!
//! Configuration is fixed for the lifetime of a predictor. It is supplied as
//! JSON by the surrounding harness or built with `Config::default()`.

use std::fmt;

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the predictor core.
///
/// Widths are log2 of the entry count of the corresponding table.
mod defaults {
    /// Default gshare history / table width (131072 entries).
    pub const GSHARE_HISTORY_BITS: usize = 17;

    /// Default Tournament local history table width (8192 entries).
    pub const TOURNAMENT_LOCAL_HIST_BITS: usize = 13;

    /// Default Tournament local prediction table width (8192 entries).
    pub const TOURNAMENT_LOCAL_PRED_BITS: usize = 13;

    /// Default Tournament global prediction table width (32768 entries).
    pub const TOURNAMENT_GLOBAL_PRED_BITS: usize = 15;

    /// Default Tournament chooser table width (32768 entries).
    pub const TOURNAMENT_CHOOSER_BITS: usize = 15;

    /// Default TAGE bimodal base table width (8192 entries).
    pub const TAGE_BIMODAL_BITS: usize = 13;

    /// Default TAGE tagged table index widths, T1 (widest) to T5 (narrowest).
    pub const TAGE_INDEX_BITS: [usize; 5] = [13, 12, 11, 10, 9];

    /// Default TAGE folded history lengths, T1 (shortest) to T5 (longest).
    pub const TAGE_HISTORY_LENGTHS: [usize; 5] = [4, 8, 16, 32, 64];
}

/// Largest accepted table width; a 2^28-entry table is already 256 MiB of counters.
pub const MAX_TABLE_BITS: usize = 28;

/// Largest accepted TAGE tag width.
pub const MAX_TAG_BITS: usize = 32;

/// Largest accepted folded history length (the width of the history register).
pub const MAX_HISTORY_LENGTH: usize = 64;

/// Branch prediction algorithm types.
///
/// Specifies which engine the facade builds on `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Static predictor (always predict taken, never train).
    #[default]
    Static,
    /// Global history predictor (gshare).
    ///
    /// XORs the PC with global history to index a table of counters.
    #[serde(alias = "Gshare")]
    GShare,
    /// Tournament predictor combining local and global predictors.
    ///
    /// A chooser learns per history context which of the two to trust.
    Tournament,
    /// Tagged history predictor.
    ///
    /// A bimodal base table backed by tagged tables of increasing history length.
    #[serde(alias = "TAGE", alias = "Custom")]
    Tage,
    /// Any mode name this build does not recognize.
    ///
    /// Predicts not-taken and never trains.
    #[serde(other)]
    Unknown,
}

impl BranchPredictor {
    /// Returns the display name reported by trace harnesses.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::GShare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Tage => "Custom",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BranchPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use bpsim_core::config::{BranchPredictor, Config};
///
/// let json = r#"{
///     "branch_predictor": "Tournament",
///     "tournament": { "chooser_bits": 12 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.branch_predictor, BranchPredictor::Tournament);
/// assert_eq!(config.tournament.chooser_bits, 12);
/// assert_eq!(config.tournament.global_pred_bits, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Config {
    /// Branch predictor type
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// GShare predictor configuration
    #[serde(default)]
    pub gshare: GShareConfig,

    /// Tournament predictor configuration
    #[serde(default)]
    pub tournament: TournamentConfig,

    /// TAGE predictor configuration
    #[serde(default)]
    pub tage: TageConfig,
}

impl Config {
    /// Creates a default configuration selecting `mode`.
    pub fn with_mode(mode: BranchPredictor) -> Self {
        Self {
            branch_predictor: mode,
            ..Self::default()
        }
    }

    /// Parses a JSON document and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or the first
    /// validation error reported by [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every table geometry.
    ///
    /// All engines are checked regardless of the selected mode, so a config
    /// that validates can be switched to any mode.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gshare.validate()?;
        self.tournament.validate()?;
        self.tage.validate()
    }
}

/// Checks that `bits` is a usable table width.
fn check_table_bits(table: &str, bits: usize) -> Result<(), ConfigError> {
    if (1..=MAX_TABLE_BITS).contains(&bits) {
        Ok(())
    } else {
        Err(ConfigError::TableBits {
            table: table.to_owned(),
            bits,
            max: MAX_TABLE_BITS,
        })
    }
}

/// GShare predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GShareConfig {
    /// History bits used for indexing; the table holds 2^history_bits counters
    #[serde(default = "GShareConfig::default_history_bits")]
    pub history_bits: usize,
}

impl GShareConfig {
    /// Returns the default gshare history width.
    fn default_history_bits() -> usize {
        defaults::GSHARE_HISTORY_BITS
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_table_bits("gshare", self.history_bits)
    }
}

impl Default for GShareConfig {
    fn default() -> Self {
        Self {
            history_bits: defaults::GSHARE_HISTORY_BITS,
        }
    }
}

/// Tournament branch predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TournamentConfig {
    /// Local history table size (log2)
    #[serde(default = "TournamentConfig::default_local_hist")]
    pub local_hist_bits: usize,

    /// Local prediction table size (log2); also the width of each local history
    #[serde(default = "TournamentConfig::default_local_pred")]
    pub local_pred_bits: usize,

    /// Global prediction table size (log2)
    #[serde(default = "TournamentConfig::default_global_pred")]
    pub global_pred_bits: usize,

    /// Chooser table size (log2)
    #[serde(default = "TournamentConfig::default_chooser")]
    pub chooser_bits: usize,
}

impl TournamentConfig {
    /// Returns the default local history table size (log2).
    fn default_local_hist() -> usize {
        defaults::TOURNAMENT_LOCAL_HIST_BITS
    }

    /// Returns the default local prediction table size (log2).
    fn default_local_pred() -> usize {
        defaults::TOURNAMENT_LOCAL_PRED_BITS
    }

    /// Returns the default global prediction table size (log2).
    fn default_global_pred() -> usize {
        defaults::TOURNAMENT_GLOBAL_PRED_BITS
    }

    /// Returns the default chooser table size (log2).
    fn default_chooser() -> usize {
        defaults::TOURNAMENT_CHOOSER_BITS
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_table_bits("tournament.local_hist", self.local_hist_bits)?;
        check_table_bits("tournament.local_pred", self.local_pred_bits)?;
        check_table_bits("tournament.global_pred", self.global_pred_bits)?;
        check_table_bits("tournament.chooser", self.chooser_bits)
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            local_hist_bits: defaults::TOURNAMENT_LOCAL_HIST_BITS,
            local_pred_bits: defaults::TOURNAMENT_LOCAL_PRED_BITS,
            global_pred_bits: defaults::TOURNAMENT_GLOBAL_PRED_BITS,
            chooser_bits: defaults::TOURNAMENT_CHOOSER_BITS,
        }
    }
}

/// Geometry of one tagged TAGE table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TageTableConfig {
    /// Table size (log2)
    pub index_bits: usize,

    /// Tag width; defaults to `index_bits`
    #[serde(default)]
    pub tag_bits: Option<usize>,

    /// Number of global history bits folded into the index
    pub history_length: usize,
}

impl TageTableConfig {
    /// Creates a table whose tag is as wide as its index.
    pub const fn new(index_bits: usize, history_length: usize) -> Self {
        Self {
            index_bits,
            tag_bits: None,
            history_length,
        }
    }

    /// Returns the effective tag width.
    pub fn tag_bits(&self) -> usize {
        self.tag_bits.unwrap_or(self.index_bits)
    }
}

/// TAGE (tagged history) predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TageConfig {
    /// Bimodal base table size (log2)
    #[serde(default = "TageConfig::default_bimodal_bits")]
    pub bimodal_bits: usize,

    /// Tagged tables, shortest history first
    #[serde(default = "TageConfig::default_tables")]
    pub tables: Vec<TageTableConfig>,

    /// Training events between usefulness resets; `None` never resets
    #[serde(default)]
    pub useful_reset_interval: Option<u64>,
}

impl TageConfig {
    /// Returns the default bimodal table size (log2).
    fn default_bimodal_bits() -> usize {
        defaults::TAGE_BIMODAL_BITS
    }

    /// Returns the default five tagged tables.
    ///
    /// Index widths shrink 13 → 9 bits while history lengths grow 4 → 64.
    fn default_tables() -> Vec<TageTableConfig> {
        defaults::TAGE_INDEX_BITS
            .iter()
            .zip(defaults::TAGE_HISTORY_LENGTHS.iter())
            .map(|(&bits, &len)| TageTableConfig::new(bits, len))
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_table_bits("tage.bimodal", self.bimodal_bits)?;
        if self.tables.is_empty() {
            return Err(ConfigError::NoTaggedTables);
        }

        let mut previous: Option<usize> = None;
        for (i, table) in self.tables.iter().enumerate() {
            let name = format!("tage.T{}", i + 1);
            check_table_bits(&name, table.index_bits)?;
            if let Some(prev) = previous.filter(|&prev| table.index_bits >= prev) {
                return Err(ConfigError::TableOrder {
                    table: name,
                    bits: table.index_bits,
                    previous: prev,
                });
            }
            if !(1..=MAX_TAG_BITS).contains(&table.tag_bits()) {
                return Err(ConfigError::TagBits {
                    table: name,
                    bits: table.tag_bits(),
                });
            }
            if !(1..=MAX_HISTORY_LENGTH).contains(&table.history_length) {
                return Err(ConfigError::HistoryLength {
                    table: name,
                    length: table.history_length,
                });
            }
            previous = Some(table.index_bits);
        }

        if self.useful_reset_interval == Some(0) {
            return Err(ConfigError::ResetInterval);
        }
        Ok(())
    }
}

impl Default for TageConfig {
    fn default() -> Self {
        Self {
            bimodal_bits: defaults::TAGE_BIMODAL_BITS,
            tables: Self::default_tables(),
            useful_reset_interval: None,
        }
    }
}
