//! TAGE (Tagged Geometric History Length) Branch Predictor.
//!
//! TAGE uses a base bimodal predictor and several tagged tables indexed with
//! increasingly long (folded) global history. It matches long history patterns
//! when they are known and falls back to shorter histories or the base
//! predictor otherwise.
//!
//! This variant keeps a 1-bit usefulness flag per entry and allocates on any
//! branch that no tagged table tracks. Usefulness is set on allocation and,
//! unless a reset interval is configured, never cleared again, so each slot is
//! allocated at most once per run.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(T) where T is the number of tagged tables (5 by default)
//!   - `update()`: O(T)
//! - **Space Complexity:** O(2^B + sum of 2^Ik) for bimodal width B and index widths Ik
//! - **Hardware Cost:** High - multiple table lookups, priority selection
//! - **Best Case:** History-correlated patterns of varying lengths
//! - **Worst Case:** Random or completely uncorrelated branches (~50% accuracy)

use super::BranchPredictor;
use crate::common::{HistoryRegister, SaturatingCounter, low_mask};
use crate::config::{TageConfig, TageTableConfig};

/// An entry in a tagged TAGE table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TageEntry {
    /// Partial PC identifying the owner; `None` until the slot is allocated.
    pub tag: Option<u32>,
    /// 2-bit saturating counter for prediction.
    pub ctr: SaturatingCounter,
    /// Usefulness flag; a slot is only allocated while this is clear.
    pub useful: bool,
}

impl TageEntry {
    /// Returns true if this entry belongs to `tag`.
    #[inline(always)]
    pub fn tag_matches(&self, tag: u32) -> bool {
        self.tag == Some(tag)
    }
}

/// One tagged table and its geometry.
#[derive(Debug, Clone)]
pub struct TaggedTable {
    /// Table of entries.
    entries: Vec<TageEntry>,
    /// Number of index bits.
    index_bits: usize,
    /// Number of tag bits.
    tag_bits: usize,
    /// Number of global history bits folded into the index.
    history_length: usize,
}

impl TaggedTable {
    /// Creates an empty table for `config`.
    pub fn new(config: &TageTableConfig) -> Self {
        Self {
            entries: vec![TageEntry::default(); 1 << config.index_bits],
            index_bits: config.index_bits,
            tag_bits: config.tag_bits(),
            history_length: config.history_length,
        }
    }

    /// Calculates the index for `pc` under history `ghr`.
    ///
    /// PC XOR folded history, reduced modulo the table size.
    #[inline(always)]
    pub const fn index(&self, pc: u32, ghr: &HistoryRegister) -> usize {
        let folded = ghr.fold(self.history_length, self.index_bits);
        ((pc as u64 ^ folded) & low_mask(self.index_bits)) as usize
    }

    /// Calculates the tag for `pc`: the unshifted PC masked to the tag width.
    #[inline(always)]
    pub const fn tag(&self, pc: u32) -> u32 {
        ((pc as u64) & low_mask(self.tag_bits)) as u32
    }

    /// Returns the entry at `index`.
    pub fn entry(&self, index: usize) -> &TageEntry {
        &self.entries[index]
    }

    /// Returns the entry at `index` for modification.
    pub fn entry_mut(&mut self, index: usize) -> &mut TageEntry {
        &mut self.entries[index]
    }

    /// Returns true if the entry selected by `pc` carries `pc`'s tag.
    #[inline(always)]
    fn hits(&self, pc: u32, ghr: &HistoryRegister) -> bool {
        self.entries[self.index(pc, ghr)].tag_matches(self.tag(pc))
    }

    /// Returns the number of entries.
    pub const fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns the folded history length.
    pub const fn history_length(&self) -> usize {
        self.history_length
    }

    /// Counts entries whose usefulness flag is set.
    pub fn useful_entries(&self) -> usize {
        self.entries.iter().filter(|e| e.useful).count()
    }

    /// Clears the usefulness flag of every entry.
    fn reset_useful(&mut self) {
        for entry in &mut self.entries {
            entry.useful = false;
        }
    }
}

/// TAGE Predictor structure.
#[derive(Debug, Clone)]
pub struct TagePredictor {
    /// Global History Register.
    ghr: HistoryRegister,

    /// Base bimodal predictor table.
    base: Vec<SaturatingCounter>,
    /// Number of PC bits indexing the base table.
    bimodal_bits: usize,

    /// Tagged tables, shortest history first.
    tables: Vec<TaggedTable>,

    /// Training events since the last usefulness reset.
    clock_counter: u64,
    /// Interval for resetting usefulness flags, if any.
    reset_interval: Option<u64>,
    /// Total number of allocations performed.
    allocations: u64,
}

impl TagePredictor {
    /// Creates a new TAGE Predictor based on configuration.
    ///
    /// The configuration is expected to have passed validation.
    pub fn new(config: &TageConfig) -> Self {
        Self {
            ghr: HistoryRegister::new(),
            base: vec![SaturatingCounter::default(); 1 << config.bimodal_bits],
            bimodal_bits: config.bimodal_bits,
            tables: config.tables.iter().map(TaggedTable::new).collect(),
            clock_counter: 0,
            reset_interval: config.useful_reset_interval,
            allocations: 0,
        }
    }

    /// Index into the bimodal table: low PC bits.
    #[inline(always)]
    const fn base_index(&self, pc: u32) -> usize {
        ((pc as u64) & low_mask(self.bimodal_bits)) as usize
    }

    /// Finds the table providing the prediction for `pc`.
    ///
    /// Tables are scanned from the longest history to the shortest; the first
    /// tag match wins. Returns `None` when only the base table applies.
    pub fn provider(&self, pc: u32) -> Option<usize> {
        self.tables.iter().rposition(|t| t.hits(pc, &self.ghr))
    }

    /// Returns the bimodal counter for `pc`.
    pub fn bimodal_counter(&self, pc: u32) -> SaturatingCounter {
        self.base[self.base_index(pc)]
    }

    /// Returns the entry of `table` that `pc` maps to under the current history.
    pub fn entry(&self, table: usize, pc: u32) -> &TageEntry {
        let t = &self.tables[table];
        t.entry(t.index(pc, &self.ghr))
    }

    /// Returns the tagged tables, shortest history first.
    pub fn tables(&self) -> &[TaggedTable] {
        &self.tables
    }

    /// Returns the tagged tables for modification.
    pub fn tables_mut(&mut self) -> &mut [TaggedTable] {
        &mut self.tables
    }

    /// Returns the number of tagged tables.
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// Returns the number of useful entries in `table`.
    pub fn useful_entries(&self, table: usize) -> usize {
        self.tables[table].useful_entries()
    }

    /// Returns the total number of allocations performed so far.
    pub const fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Returns the global history register.
    pub const fn history(&self) -> HistoryRegister {
        self.ghr
    }

    /// Allocates an entry for `pc` in the first table, shortest history
    /// first, whose slot is not useful.
    ///
    /// The new entry inherits the slot's counter and nudges it toward the
    /// outcome. Returns the table that was allocated into, if any.
    fn allocate(&mut self, pc: u32, taken: bool) -> Option<usize> {
        let ghr = self.ghr;
        for (i, table) in self.tables.iter_mut().enumerate() {
            let idx = table.index(pc, &ghr);
            let tag = table.tag(pc);
            let entry = table.entry_mut(idx);
            if !entry.useful {
                entry.tag = Some(tag);
                entry.useful = true;
                entry.ctr.train(taken);
                self.allocations += 1;
                return Some(i);
            }
        }
        None
    }

    /// Advances the usefulness reset clock, clearing every flag when it expires.
    fn tick_reset_clock(&mut self) {
        let Some(interval) = self.reset_interval else {
            return;
        };
        self.clock_counter += 1;
        if self.clock_counter >= interval {
            self.clock_counter = 0;
            for table in &mut self.tables {
                table.reset_useful();
            }
        }
    }
}

impl BranchPredictor for TagePredictor {
    /// Predicts branch direction.
    ///
    /// Uses the counter of the longest-history tag match, or the bimodal
    /// counter if no tagged table tracks this branch.
    fn predict_branch(&self, pc: u32) -> bool {
        match self.provider(pc) {
            Some(i) => self.entry(i, pc).ctr.is_taken(),
            None => self.bimodal_counter(pc).is_taken(),
        }
    }

    /// Updates the predictor state.
    ///
    /// Always trains the bimodal counter. A matching provider is trained in
    /// place; otherwise a new entry is allocated. History advances once.
    fn update_branch(&mut self, pc: u32, taken: bool) {
        let provider = self.provider(pc);

        let base_idx = self.base_index(pc);
        self.base[base_idx].train(taken);

        match provider {
            Some(i) => {
                let table = &mut self.tables[i];
                let idx = table.index(pc, &self.ghr);
                table.entry_mut(idx).ctr.train(taken);
            }
            None => {
                let _ = self.allocate(pc, taken);
            }
        }

        self.ghr.push(taken);
        self.tick_reset_clock();
    }
}
