//! GShare Predictor Tests.
//!
//! Verifies index hashing, counter convergence, and the four-entry
//! walk-through with a two-bit history.

use bpsim_core::BranchPredictor;
use bpsim_core::bru::gshare::GSharePredictor;
use bpsim_core::common::SaturatingCounter;
use bpsim_core::config::GShareConfig;
use pretty_assertions::assert_eq;

use crate::common::{run_trace, train};

fn gshare(history_bits: usize) -> GSharePredictor {
    GSharePredictor::new(&GShareConfig { history_bits })
}

// ══════════════════════════════════════════════════════════
// 1. Initial state
// ══════════════════════════════════════════════════════════

/// Table has 2^history_bits entries, all weakly not-taken.
#[test]
fn gshare_initial_not_taken() {
    let bp = gshare(10);
    assert_eq!(bp.size(), 1024);
    assert_eq!(bp.history().value(), 0);
    for pc in [0, 0x40, 0x1000, u32::MAX] {
        assert_eq!(bp.counter(pc), SaturatingCounter::WeaklyNotTaken);
        assert!(!bp.predict_branch(pc));
    }
}

/// The default configuration builds a 128K-entry table.
#[test]
fn gshare_default_size() {
    let bp = GSharePredictor::new(&GShareConfig::default());
    assert_eq!(bp.size(), 1 << 17);
}

// ══════════════════════════════════════════════════════════
// 2. Indexing
// ══════════════════════════════════════════════════════════

/// PCs that agree in their low history_bits bits share an index under any history.
#[test]
fn gshare_index_ignores_high_pc_bits() {
    let mut bp = gshare(4);
    let trace: Vec<(u32, bool)> = (0..37).map(|i| (i * 4, i % 3 == 0)).collect();
    let _ = run_trace(&mut bp, &trace);

    for pc in 0..16u32 {
        assert_eq!(bp.index(pc), bp.index(pc + 0x10));
        assert_eq!(bp.index(pc), bp.index(pc | 0xffff_0000));
        assert_eq!(bp.predict_branch(pc), bp.predict_branch(pc + 0x30));
    }
}

/// Index is PC XOR history, both masked.
#[test]
fn gshare_index_xors_history() {
    let mut bp = gshare(4);
    bp.update_branch(0, true);
    bp.update_branch(0, false);
    bp.update_branch(0, true);
    assert_eq!(bp.history().value(), 0b101);
    assert_eq!(bp.index(0b0110), 0b0110 ^ 0b0101);
    assert_eq!(bp.index(0xfff6), 0b0110 ^ 0b0101);
}

/// Prediction never changes state.
#[test]
fn gshare_predict_is_pure() {
    let mut bp = gshare(6);
    train(&mut bp, 0x20, true, 3);
    let before = bp.clone();
    for _ in 0..10 {
        let _ = bp.predict_branch(0x20);
    }
    assert_eq!(bp.history(), before.history());
    assert_eq!(bp.counter(0x20), before.counter(0x20));
}

// ══════════════════════════════════════════════════════════
// 3. Convergence
// ══════════════════════════════════════════════════════════

/// Once all-taken history saturates the index, the counter walks to strongly taken.
#[test]
fn gshare_learns_taken() {
    let mut bp = gshare(4);
    let pc = 0x1234;
    train(&mut bp, pc, true, 4);
    assert_eq!(bp.history().low(4), 0xf);
    assert_eq!(bp.index(pc), 0x4 ^ 0xf);
    assert_eq!(bp.counter(pc), SaturatingCounter::WeaklyNotTaken);

    let expected = [
        SaturatingCounter::WeaklyTaken,
        SaturatingCounter::StronglyTaken,
        SaturatingCounter::StronglyTaken,
        SaturatingCounter::StronglyTaken,
    ];
    for state in expected {
        bp.update_branch(pc, true);
        assert_eq!(bp.counter(pc), state);
        assert!(bp.predict_branch(pc));
    }
}

/// A strongly taken counter needs two not-taken outcomes to flip.
#[test]
fn gshare_hysteresis() {
    let mut bp = gshare(4);
    let pc = 0x7;
    train(&mut bp, pc, true, 6);
    assert_eq!(bp.counter(pc), SaturatingCounter::StronglyTaken);

    let mut probe = bp.clone();
    probe.update_branch(pc, false);
    // Under the new history, PC 6 maps to the entry PC 7 just trained.
    assert_eq!(bp.index(pc), (pc as usize) ^ 0xf);
    assert_eq!(probe.history().low(4), 0xe);
    assert_eq!(probe.counter(pc ^ 0x1), SaturatingCounter::WeaklyTaken);
}

// ══════════════════════════════════════════════════════════
// 4. Walk-through
// ══════════════════════════════════════════════════════════

/// Two-bit history, PC 0, all taken: each step visits the entry selected
/// by the history so far.
#[test]
fn gshare_two_bit_walkthrough() {
    let mut bp = gshare(2);
    assert_eq!(bp.size(), 4);

    assert_eq!(bp.index(0), 0);
    assert!(!bp.predict_branch(0), "table starts weakly not-taken");
    bp.update_branch(0, true);
    assert_eq!(bp.history().value(), 0b1);

    assert_eq!(bp.index(0), 1);
    assert!(!bp.predict_branch(0), "entry 1 is still weakly not-taken");
    bp.update_branch(0, true);
    assert_eq!(bp.history().low(2), 0b11);

    assert_eq!(bp.index(0), 3);
    assert!(!bp.predict_branch(0));
    bp.update_branch(0, true);
    assert!(bp.predict_branch(0));
    bp.update_branch(0, true);
    assert_eq!(bp.counter(0), SaturatingCounter::StronglyTaken);

    for _ in 0..8 {
        assert!(bp.predict_branch(0));
        bp.update_branch(0, true);
    }
    assert_eq!(bp.counter(0), SaturatingCounter::StronglyTaken);
}
