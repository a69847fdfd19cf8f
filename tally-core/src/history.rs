//! Bounded undo history of counter snapshots.
//!
//! A sliding window: new checkpoints go on the back, and once the window is
//! full the oldest one falls off the front.

use crate::counter::CounterSnapshot;
use std::collections::VecDeque;

/// Maximum number of checkpoints kept.
pub const MAX_HISTORY: usize = 20;

/// Where a checkpoint came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointKind {
    /// The pristine state captured at startup. No log entry belongs to it.
    Baseline,
    /// The state right before a logged action.
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub kind: CheckpointKind,
    pub snapshot: CounterSnapshot,
}

/// Result of stepping the history back once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoStep {
    /// More checkpoints remain below the popped one.
    Restore(Checkpoint),
    /// The last checkpoint was popped. The time origin must be cleared.
    Exhausted(Checkpoint),
}

impl UndoStep {
    pub fn checkpoint(&self) -> &Checkpoint {
        match self {
            UndoStep::Restore(checkpoint) | UndoStep::Exhausted(checkpoint) => checkpoint,
        }
    }
}

#[derive(Debug)]
pub struct HistoryStack {
    entries: VecDeque<Checkpoint>,
    capacity: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record the startup state.
    pub fn push_baseline(&mut self, snapshot: CounterSnapshot) {
        self.push_checkpoint(Checkpoint {
            kind: CheckpointKind::Baseline,
            snapshot,
        });
    }

    /// Drop every checkpoint and start over from `snapshot` as the baseline.
    pub fn reset_to_baseline(&mut self, snapshot: CounterSnapshot) {
        self.entries.clear();
        self.push_baseline(snapshot);
    }

    /// Record the state right before an action.
    pub fn push(&mut self, snapshot: CounterSnapshot) {
        self.push_checkpoint(Checkpoint {
            kind: CheckpointKind::Action,
            snapshot,
        });
    }

    fn push_checkpoint(&mut self, checkpoint: Checkpoint) {
        self.entries.push_back(checkpoint);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Pop the newest checkpoint for undo.
    ///
    /// Returns `None` when there is nothing left.
    pub fn pop_for_undo(&mut self) -> Option<UndoStep> {
        let checkpoint = self.entries.pop_back()?;
        if self.entries.is_empty() {
            Some(UndoStep::Exhausted(checkpoint))
        } else {
            Some(UndoStep::Restore(checkpoint))
        }
    }

    pub fn peek(&self) -> Option<&Checkpoint> {
        self.entries.back()
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

    /// Number of checkpoints that belong to logged actions.
    pub fn action_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|c| c.kind == CheckpointKind::Action)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::CounterId;

    fn snap(value: u64) -> CounterSnapshot {
        CounterSnapshot::new(vec![(CounterId::Cold, value)])
    }

    #[test]
    fn test_length_is_min_of_pushes_and_capacity() {
        for pushes in [0usize, 1, 5, 19, 20, 21, 45] {
            let mut history = HistoryStack::new();
            for i in 0..pushes {
                history.push(snap(i as u64));
            }
            assert_eq!(history.len(), pushes.min(MAX_HISTORY), "pushes = {pushes}");
        }
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut history = HistoryStack::new();
        history.push_baseline(snap(0));
        for i in 1..=MAX_HISTORY as u64 {
            history.push(snap(i));
        }
        assert_eq!(history.len(), MAX_HISTORY);
        // baseline is gone, the window now starts at 1
        let first = history.iter().next().unwrap();
        assert_eq!(first.kind, CheckpointKind::Action);
        assert_eq!(first.snapshot, snap(1));
        assert_eq!(history.peek().unwrap().snapshot, snap(MAX_HISTORY as u64));
        assert_eq!(history.action_count(), MAX_HISTORY);
    }

    #[test]
    fn test_pop_two_tiers() {
        let mut history = HistoryStack::new();
        history.push_baseline(snap(0));
        history.push(snap(1));

        let step = history.pop_for_undo().unwrap();
        assert_eq!(
            step,
            UndoStep::Restore(Checkpoint {
                kind: CheckpointKind::Action,
                snapshot: snap(1),
            })
        );
        assert_eq!(history.len(), 1);

        let step = history.pop_for_undo().unwrap();
        assert!(matches!(step, UndoStep::Exhausted(_)));
        assert_eq!(step.checkpoint().kind, CheckpointKind::Baseline);
        assert!(history.is_empty());

        assert_eq!(history.pop_for_undo(), None);
    }

    #[test]
    fn test_reset_to_baseline_forgets_actions() {
        let mut history = HistoryStack::new();
        history.push_baseline(snap(0));
        for i in 1..=5 {
            history.push(snap(i));
        }
        history.reset_to_baseline(snap(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.action_count(), 0);
        assert_eq!(history.peek().unwrap().kind, CheckpointKind::Baseline);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut history = HistoryStack::with_capacity(0);
        history.push(snap(1));
        history.push(snap(2));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.peek().unwrap().snapshot, snap(2));
    }
}
