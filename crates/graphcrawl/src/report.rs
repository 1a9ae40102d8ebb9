//! Per-session counters.

use std::fmt;

use serde::Serialize;

/// What one `resume` call did.
///
/// Counters only: a session has no pass/fail verdict. The durable result is
/// the graph it left behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Loop iterations run.
    pub iterations: usize,
    /// Frontier states appended to the pending list at boot.
    pub recovered_targets: usize,
    /// App restarts, including the boot restart.
    pub restarts: usize,
    /// Untried gestures executed.
    pub exploratory_actions: usize,
    /// Gestures executed while replaying stored paths.
    pub replay_actions: usize,
    /// States this session registered first.
    pub new_states: usize,
    /// Edges this session recorded first.
    pub new_edges: usize,
    /// Replays that landed somewhere unexpected.
    pub divergences: usize,
    /// Targets deferred because no stored path reached them.
    pub unreachable: usize,
    /// Targets popped with nothing left to try.
    pub fully_explored: usize,
    /// Stack length when the session ended.
    pub remaining_stack: usize,
    /// Pending targets when the session ended.
    pub remaining_pending: usize,
}

impl SessionReport {
    /// Total gestures sent to the device.
    pub fn actions(&self) -> usize {
        self.exploratory_actions + self.replay_actions
    }

    /// Whether the session ran out of work rather than out of budget.
    pub fn drained(&self) -> bool {
        self.remaining_stack == 0 && self.remaining_pending == 0
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "iterations:          {}", self.iterations)?;
        writeln!(f, "recovered targets:   {}", self.recovered_targets)?;
        writeln!(f, "restarts:            {}", self.restarts)?;
        writeln!(
            f,
            "actions:             {} ({} exploratory, {} replay)",
            self.actions(),
            self.exploratory_actions,
            self.replay_actions
        )?;
        writeln!(f, "new states:          {}", self.new_states)?;
        writeln!(f, "new edges:           {}", self.new_edges)?;
        writeln!(f, "divergences:         {}", self.divergences)?;
        writeln!(f, "unreachable:         {}", self.unreachable)?;
        writeln!(f, "fully explored pops: {}", self.fully_explored)?;
        write!(
            f,
            "remaining work:      {} stacked, {} pending",
            self.remaining_stack, self.remaining_pending
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let report = SessionReport {
            exploratory_actions: 3,
            replay_actions: 4,
            remaining_pending: 1,
            ..Default::default()
        };
        assert_eq!(report.actions(), 7);
        assert!(!report.drained());
        assert!(SessionReport::default().drained());
    }

    #[test]
    fn test_display_and_json() {
        let report = SessionReport {
            iterations: 5,
            divergences: 1,
            ..Default::default()
        };
        let text = report.to_string();
        assert!(text.contains("iterations:          5"));
        assert!(text.contains("divergences:         1"));

        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["iterations"], 5);
        assert_eq!(json["new_edges"], 0);
    }
}
