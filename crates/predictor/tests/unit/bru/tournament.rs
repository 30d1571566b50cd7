//! Tournament Predictor Tests.
//!
//! Verifies the chooser state machine, training of both components on
//! every branch, and local history maintenance.

use bpsim_core::BranchPredictor;
use bpsim_core::bru::tournament::{Choice, TournamentPredictor};
use bpsim_core::common::SaturatingCounter;
use bpsim_core::config::TournamentConfig;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::{run_trace, small_tournament_config, train};

/// Position of a chooser state on the global (0) to local (3) axis.
fn rank(choice: Choice) -> u8 {
    match choice {
        Choice::StronglyGlobal => 0,
        Choice::WeaklyGlobal => 1,
        Choice::WeaklyLocal => 2,
        Choice::StronglyLocal => 3,
    }
}

fn trace_strategy() -> impl Strategy<Value = Vec<(u32, bool)>> {
    proptest::collection::vec((0u32..512, any::<bool>()), 0..200)
}

// ══════════════════════════════════════════════════════════
// 1. Chooser state machine
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Choice::StronglyGlobal, Choice::StronglyGlobal, Choice::WeaklyGlobal)]
#[case(Choice::WeaklyGlobal, Choice::StronglyGlobal, Choice::WeaklyLocal)]
#[case(Choice::WeaklyLocal, Choice::WeaklyGlobal, Choice::StronglyLocal)]
#[case(Choice::StronglyLocal, Choice::WeaklyLocal, Choice::StronglyLocal)]
fn choice_transitions(
    #[case] from: Choice,
    #[case] global_won: Choice,
    #[case] local_won: Choice,
) {
    assert_eq!(from.toward_global(), global_won);
    assert_eq!(from.toward_local(), local_won);
}

/// The chooser starts on the global side, one step from flipping.
#[test]
fn choice_default_is_weakly_global() {
    assert_eq!(Choice::default(), Choice::WeaklyGlobal);
    assert!(Choice::WeaklyGlobal.prefers_global());
    assert!(Choice::StronglyGlobal.prefers_global());
    assert!(!Choice::WeaklyLocal.prefers_global());
    assert!(!Choice::StronglyLocal.prefers_global());
}

// ══════════════════════════════════════════════════════════
// 2. Initial state
// ══════════════════════════════════════════════════════════

/// Fresh tables predict not-taken through the global component.
#[test]
fn tournament_initial_state() {
    let bp = TournamentPredictor::new(&small_tournament_config());
    assert_eq!(bp.choice(), Choice::WeaklyGlobal);
    assert_eq!(bp.global_counter(0x40), SaturatingCounter::WeaklyNotTaken);
    assert_eq!(bp.local_counter(0x40), SaturatingCounter::WeaklyNotTaken);
    assert!(!bp.predict_branch(0x40));
    assert_eq!(bp.local_table().len(), 64);
    assert_eq!(bp.global_table().len(), 64);
    assert_eq!(bp.chooser_table().len(), 64);
}

/// Default geometry: 8K local histories and predictions, 32K global and chooser entries.
#[test]
fn tournament_default_sizes() {
    let bp = TournamentPredictor::new(&TournamentConfig::default());
    assert_eq!(bp.local_table().len(), 1 << 13);
    assert_eq!(bp.global_table().len(), 1 << 15);
    assert_eq!(bp.chooser_table().len(), 1 << 15);
}

// ══════════════════════════════════════════════════════════
// 3. Training
// ══════════════════════════════════════════════════════════

/// Local history is a per-branch shift register masked to local_pred_bits.
#[test]
fn tournament_local_history_is_masked() {
    let mut bp = TournamentPredictor::new(&small_tournament_config());
    train(&mut bp, 5, true, 10);
    assert_eq!(bp.local_history(5), 0b11_1111);
    train(&mut bp, 5, false, 3);
    assert_eq!(bp.local_history(5), 0b11_1000);
    // Another branch owns a separate entry.
    assert_eq!(bp.local_history(6), 0);
    // PCs aliasing in the low local_hist_bits share it.
    assert_eq!(bp.local_history(5 + 64), 0b11_1000);
}

/// Both components learn a strictly alternating branch.
#[test]
fn tournament_learns_alternating_branch() {
    let mut bp = TournamentPredictor::new(&small_tournament_config());
    let warmup: Vec<(u32, bool)> = (0..100).map(|i| (0x40, i % 2 == 0)).collect();
    let steady: Vec<(u32, bool)> = (100..200).map(|i| (0x40, i % 2 == 0)).collect();
    let _ = run_trace(&mut bp, &warmup);
    assert_eq!(run_trace(&mut bp, &steady), steady.len());
}

proptest! {
    /// After any history, one training call moves the local and the global
    /// counter it consulted by exactly one step, whichever side the chooser favors.
    #[test]
    fn tournament_trains_both_components(
        prefix in trace_strategy(),
        pc in 0u32..512,
        taken in any::<bool>(),
    ) {
        let mut bp = TournamentPredictor::new(&small_tournament_config());
        let _ = run_trace(&mut bp, &prefix);

        let l_idx = bp.local_index(pc);
        let g_idx = bp.global_index(pc);
        let local = bp.local_table()[l_idx];
        let global = bp.global_table()[g_idx];

        bp.update_branch(pc, taken);

        prop_assert_eq!(bp.local_table()[l_idx], local.update(taken));
        prop_assert_eq!(bp.global_table()[g_idx], global.update(taken));
    }

    /// The chooser only moves on disagreement, and then only toward the
    /// component that was right.
    #[test]
    fn tournament_chooser_is_monotonic(trace in trace_strategy()) {
        let mut bp = TournamentPredictor::new(&small_tournament_config());
        for (pc, taken) in trace {
            let c_idx = bp.chooser_index();
            let before = bp.chooser_table()[c_idx];
            let local_pred = bp.local_counter(pc).is_taken();
            let global_pred = bp.global_counter(pc).is_taken();

            bp.update_branch(pc, taken);
            let after = bp.chooser_table()[c_idx];

            if local_pred == global_pred {
                prop_assert_eq!(after, before);
            } else if global_pred == taken {
                prop_assert_eq!(after, before.toward_global());
                prop_assert!(rank(after) <= rank(before));
            } else {
                prop_assert_eq!(after, before.toward_local());
                prop_assert!(rank(after) >= rank(before));
            }
        }
    }

    /// The prediction is always the direction of the component the chooser selects.
    #[test]
    fn tournament_prediction_follows_chooser(prefix in trace_strategy(), pc in 0u32..512) {
        let mut bp = TournamentPredictor::new(&small_tournament_config());
        let _ = run_trace(&mut bp, &prefix);
        let expected = if bp.choice().prefers_global() {
            bp.global_counter(pc).is_taken()
        } else {
            bp.local_counter(pc).is_taken()
        };
        prop_assert_eq!(bp.predict_branch(pc), expected);
    }
}
