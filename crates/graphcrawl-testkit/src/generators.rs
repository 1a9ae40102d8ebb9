//! Proptest generators for property-based testing.

use proptest::prelude::*;

use graphcrawl_core::{Action, StateId};
use graphcrawl_device::AppModel;

/// Any gesture.
pub fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

/// A non-empty vocabulary in canonical order.
pub fn vocabulary() -> impl Strategy<Value = Vec<Action>> {
    prop::sample::subsequence(Action::ALL.to_vec(), 1..=Action::ALL.len())
}

/// A short hex fingerprint.
pub fn state_id() -> impl Strategy<Value = StateId> {
    any::<[u8; 4]>().prop_map(|bytes| StateId::fingerprint(&bytes))
}

/// A list of edges over states `s0..s{max_states}`.
pub fn edges(max_states: usize, max_edges: usize) -> impl Strategy<Value = Vec<(StateId, Action, StateId)>> {
    prop::collection::vec((0..max_states, action(), 0..max_states), 0..=max_edges).prop_map(
        |raw| {
            raw.into_iter()
                .map(|(from, action, to)| (state_name(from), action, state_name(to)))
                .collect()
        },
    )
}

fn state_name(i: usize) -> StateId {
    StateId::new(format!("s{i}"))
}

/// A deterministic app over `2..=max_states` screens rooted at `s0`.
///
/// Each `(screen, gesture)` pair has a transition with probability about
/// one half. Not every screen needs to be reachable.
pub fn deterministic_model(max_states: usize) -> impl Strategy<Value = AppModel> {
    (2..=max_states.max(2))
        .prop_flat_map(|n| {
            let cells = n * Action::ALL.len();
            (Just(n), prop::collection::vec(prop::option::of(0..n), cells))
        })
        .prop_map(|(n, targets)| {
            let mut model = AppModel::new(state_name(0));
            for (cell, target) in targets.into_iter().enumerate() {
                if let Some(to) = target {
                    let from = cell / Action::ALL.len();
                    let action = Action::ALL[cell % Action::ALL.len()];
                    debug_assert!(from < n);
                    model = model.with_transition(state_name(from), action, state_name(to));
                }
            }
            model
        })
}

/// Like [`deterministic_model`], but some transitions have two outcomes.
pub fn nondeterministic_model(max_states: usize) -> impl Strategy<Value = AppModel> {
    (deterministic_model(max_states), any::<u64>()).prop_map(|(model, mask)| {
        let n = model.reachable_states().len().max(1);
        let mut out = AppModel {
            roots: model.roots.clone(),
            transitions: Vec::new(),
        };
        for (i, mut t) in model.transitions.into_iter().enumerate() {
            if mask & (1 << (i % 64)) != 0 {
                let extra = state_name((i * 7) % n);
                if !t.to.contains(&extra) {
                    t.to.push(extra);
                }
            }
            out.transitions.push(t);
        }
        out
    })
}
