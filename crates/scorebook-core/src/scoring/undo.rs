use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::undo::CAPACITY;
use crate::state::MatchState;

/// State captured before a mutating operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// What the operation did, e.g. "Ball: wd+2"
    pub label: String,
    pub state: MatchState,
}

/// Bounded undo stack. The oldest snapshot is dropped once full.
#[derive(Debug, Clone)]
pub struct UndoLedger {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl UndoLedger {
    pub fn new() -> Self {
        Self::with_capacity(CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Remember `state` as it was before the operation named by `label`
    pub fn push(&mut self, label: impl Into<String>, state: &MatchState) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity
            && let Some(dropped) = self.entries.pop_front()
        {
            debug!("Undo history full, dropping \"{}\"", dropped.label);
        }
        self.entries.push_back(Snapshot {
            label: label.into(),
            state: state.clone(),
        });
    }

    /// Pop the most recent snapshot
    pub fn undo(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Label of the operation the next `undo` would revert
    pub fn last_label(&self) -> Option<&str> {
        self.entries.back().map(|s| s.label.as_str())
    }

    /// Labels, oldest first
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.label.as_str())
    }
}

impl Default for UndoLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchSettings;
    use crate::state::Team;

    fn state_with_runs(runs: u32) -> MatchState {
        let mut state = MatchState::new(
            MatchSettings::default(),
            &Team::new("Falcons", Vec::new()),
            &Team::new("Herons", Vec::new()),
        )
        .unwrap();
        state.innings.runs = runs;
        state
    }

    #[test]
    fn test_undo_returns_last_pushed() {
        let mut ledger = UndoLedger::new();
        ledger.push("first", &state_with_runs(1));
        ledger.push("second", &state_with_runs(2));

        assert_eq!(ledger.last_label(), Some("second"));
        let snapshot = ledger.undo().unwrap();
        assert_eq!(snapshot.label, "second");
        assert_eq!(snapshot.state.innings.runs, 2);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_undo_empty() {
        let mut ledger = UndoLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.undo().is_none());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut ledger = UndoLedger::new();
        for runs in 0..60 {
            ledger.push(format!("ball {}", runs), &state_with_runs(runs));
        }

        assert_eq!(ledger.len(), CAPACITY);
        assert_eq!(ledger.labels().next(), Some("ball 10"));
        assert_eq!(ledger.last_label(), Some("ball 59"));
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut ledger = UndoLedger::with_capacity(0);
        ledger.push("ignored", &state_with_runs(1));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_snapshot_is_a_deep_copy() {
        let mut ledger = UndoLedger::new();
        let mut state = state_with_runs(5);
        ledger.push("before", &state);
        state.innings.runs = 99;
        state.innings.batting[0].runs = 40;

        let snapshot = ledger.undo().unwrap();
        assert_eq!(snapshot.state.innings.runs, 5);
        assert_eq!(snapshot.state.innings.batting[0].runs, 0);
    }
}
