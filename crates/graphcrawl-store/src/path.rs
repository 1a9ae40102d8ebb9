//! Breadth-first shortest path over recorded edges.
//!
//! Shared by every backend so that path choice is identical regardless of
//! where the graph lives.

use std::collections::{HashMap, HashSet, VecDeque};

use graphcrawl_core::{Action, PathStep, StateId};

use crate::error::Result;

/// Find the shortest path from `from` to `to`.
///
/// `successors` must return the outgoing `(action, to)` pairs of a state,
/// sorted by action then destination; ties between equally short paths are
/// broken by that order.
pub(crate) fn shortest_path<F>(from: &StateId, to: &StateId, mut successors: F) -> Result<Vec<PathStep>>
where
    F: FnMut(&StateId) -> Result<Vec<(Action, StateId)>>,
{
    if from == to {
        return Ok(Vec::new());
    }

    let mut visited: HashSet<StateId> = HashSet::new();
    let mut parent: HashMap<StateId, (StateId, Action)> = HashMap::new();
    let mut queue = VecDeque::new();

    visited.insert(from.clone());
    queue.push_back(from.clone());

    while let Some(current) = queue.pop_front() {
        for (action, next) in successors(&current)? {
            if !visited.insert(next.clone()) {
                continue;
            }
            parent.insert(next.clone(), (current.clone(), action));
            if &next == to {
                return Ok(rebuild(from, to, &parent));
            }
            queue.push_back(next);
        }
    }

    Ok(Vec::new())
}

fn rebuild(from: &StateId, to: &StateId, parent: &HashMap<StateId, (StateId, Action)>) -> Vec<PathStep> {
    let mut steps = Vec::new();
    let mut cursor = to.clone();
    while &cursor != from {
        // Every visited node except `from` has a parent entry.
        let Some((prev, action)) = parent.get(&cursor) else {
            break;
        };
        steps.push(PathStep::new(cursor.clone(), *action));
        cursor = prev.clone();
    }
    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn graph(edges: &[(&str, Action, &str)]) -> BTreeMap<StateId, Vec<(Action, StateId)>> {
        let mut g: BTreeMap<StateId, Vec<(Action, StateId)>> = BTreeMap::new();
        for (from, action, to) in edges {
            g.entry(StateId::from(*from))
                .or_default()
                .push((*action, StateId::from(*to)));
        }
        for succ in g.values_mut() {
            succ.sort();
        }
        g
    }

    fn path_in(
        g: &BTreeMap<StateId, Vec<(Action, StateId)>>,
        from: &str,
        to: &str,
    ) -> Vec<PathStep> {
        shortest_path(&from.into(), &to.into(), |s| {
            Ok(g.get(s).cloned().unwrap_or_default())
        })
        .unwrap()
    }

    #[test]
    fn test_prefers_fewer_hops() {
        let g = graph(&[
            ("A", Action::ClickCenter, "B"),
            ("B", Action::ClickCenter, "C"),
            ("C", Action::ClickCenter, "D"),
            ("A", Action::SwipeUp, "D"),
        ]);
        assert_eq!(path_in(&g, "A", "D"), vec![PathStep::new("D", Action::SwipeUp)]);
    }

    #[test]
    fn test_multi_hop_path_in_order() {
        let g = graph(&[
            ("s0", Action::SwipeLeft, "s1"),
            ("s1", Action::ClickBottom, "target"),
        ]);
        assert_eq!(
            path_in(&g, "s0", "target"),
            vec![
                PathStep::new("s1", Action::SwipeLeft),
                PathStep::new("target", Action::ClickBottom),
            ]
        );
    }

    #[test]
    fn test_disconnected_and_identical_are_empty() {
        let g = graph(&[("A", Action::SwipeUp, "B")]);
        assert!(path_in(&g, "B", "A").is_empty());
        assert!(path_in(&g, "A", "A").is_empty());
        assert!(path_in(&g, "A", "unknown").is_empty());
    }

    #[test]
    fn test_cycles_terminate() {
        let g = graph(&[
            ("A", Action::SwipeUp, "B"),
            ("B", Action::SwipeDown, "A"),
            ("B", Action::SwipeUp, "B"),
        ]);
        assert!(path_in(&g, "A", "Z").is_empty());
        assert_eq!(path_in(&g, "B", "A"), vec![PathStep::new("A", Action::SwipeDown)]);
    }

    #[test]
    fn test_tie_broken_by_action_order() {
        let g = graph(&[
            ("A", Action::SwipeRight, "B"),
            ("A", Action::ClickCenter, "B"),
        ]);
        assert_eq!(path_in(&g, "A", "B"), vec![PathStep::new("B", Action::ClickCenter)]);
    }
}
