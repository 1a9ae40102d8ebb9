//! Canned app models and graphs.
//!
//! Each scenario is small enough to reason about by hand, and each one
//! exercises a particular behavior of the crawler.

use graphcrawl_core::Action;
use graphcrawl_device::AppModel;
use graphcrawl_store::GraphStore;

/// One screen whose center tap leads to a second screen.
///
/// `"R" --click_center--> "R-click_center"`, everything else is a self-loop.
pub fn single_tap() -> AppModel {
    AppModel::new("R").with_transition("R", Action::ClickCenter, "R-click_center")
}

/// Three screens in a row: `A --swipe_up--> B`, `C` only reachable by
/// jumping there directly.
///
/// Pair with [`seed_single_edge`] for a graph that knows `(A, swipe_up, B)`.
pub fn a_to_b() -> AppModel {
    AppModel::new("A").with_transition("A", Action::SwipeUp, "B")
}

/// Record `(A, swipe_up, B)` in `store`.
pub fn seed_single_edge<S: GraphStore + ?Sized>(store: &S) {
    store
        .add_edge(&"A".into(), Action::SwipeUp, &"B".into())
        .expect("seed edge");
}

/// Graph `s0 --click_center--> s1 --swipe_left--> target`.
pub fn seed_replay_path<S: GraphStore + ?Sized>(store: &S) {
    store
        .add_edge(&"s0".into(), Action::ClickCenter, &"s1".into())
        .expect("seed edge");
    store
        .add_edge(&"s1".into(), Action::SwipeLeft, &"target".into())
        .expect("seed edge");
}

/// An app where the graph from [`seed_replay_path`] has gone stale: the
/// second step now lands on `s1-prime`.
pub fn stale_replay_path() -> AppModel {
    AppModel::new("s0")
        .with_transition("s0", Action::ClickCenter, "s1")
        .with_transition("s1", Action::SwipeLeft, "s1-prime")
}

/// A login screen in front of a small tabbed app.
pub fn login_flow() -> AppModel {
    AppModel::new("login")
        .with_transition("login", Action::ClickCenter, "home")
        .with_transition("home", Action::SwipeLeft, "search")
        .with_transition("home", Action::SwipeRight, "profile")
        .with_transition("search", Action::SwipeRight, "home")
        .with_transition("search", Action::ClickCenter, "result")
        .with_transition("result", Action::SwipeDown, "search")
        .with_transition("profile", Action::SwipeLeft, "home")
        .with_transition("profile", Action::ClickBottom, "login")
}

/// `n` screens chained by `swipe_up`, `swipe_down` going back one.
pub fn linear_chain(n: usize) -> AppModel {
    let name = |i: usize| format!("page-{i}");
    let mut model = AppModel::new(name(0));
    for i in 1..n {
        model = model
            .with_transition(name(i - 1), Action::SwipeUp, name(i))
            .with_transition(name(i), Action::SwipeDown, name(i - 1));
    }
    model
}

/// Boots alternately into `splash` and `onboarding`.
pub fn two_roots() -> AppModel {
    AppModel::new("splash")
        .with_root("onboarding")
        .with_transition("splash", Action::ClickCenter, "home")
        .with_transition("onboarding", Action::ClickBottom, "home")
        .with_transition("home", Action::SwipeUp, "feed")
}

/// A feed whose swipe sometimes shows an ad.
pub fn flaky_feed() -> AppModel {
    AppModel::new("feed")
        .with_outcomes("feed", Action::SwipeUp, ["post", "ad"])
        .with_transition("post", Action::SwipeDown, "feed")
        .with_transition("ad", Action::ClickBottom, "feed")
}

/// Every scenario model, by name.
pub fn all_models() -> Vec<(&'static str, AppModel)> {
    vec![
        ("single_tap", single_tap()),
        ("a_to_b", a_to_b()),
        ("stale_replay_path", stale_replay_path()),
        ("login_flow", login_flow()),
        ("linear_chain", linear_chain(6)),
        ("two_roots", two_roots()),
        ("flaky_feed", flaky_feed()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_models_valid() {
        for (name, model) in all_models() {
            assert!(model.validate().is_ok(), "{name} is invalid");
        }
    }

    #[test]
    fn test_reachability() {
        assert_eq!(login_flow().reachable_states().len(), 5);
        assert_eq!(linear_chain(6).reachable_states().len(), 6);
        assert_eq!(two_roots().reachable_states().len(), 4);
        assert_eq!(flaky_feed().reachable_states().len(), 3);
    }
}
