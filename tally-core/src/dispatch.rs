//! Coordinated execution of user actions against the session state.
//!
//! Every undoable action runs in the same order: checkpoint the counters,
//! append the log entry, then mutate. Both the checkpoint and the log entry
//! therefore describe the moment right before the mutation.

use crate::action_log::{ActionKind, ActionLog, RebaseOutcome};
use crate::clock::{Clock, SystemClock};
use crate::counter::{CounterBank, CounterId};
use crate::history::{CheckpointKind, HistoryStack, UndoStep};
use crate::summary::summary;
use chrono::{DateTime, Local};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Increment(CounterId),
    Decrement(CounterId),
    Clear(CounterId),
    ClearAll,
    Undo,
    ResetLogAndCounters,
    StartStreamReset,
    RebaseStartTime(DateTime<Local>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Undo restored a checkpoint; more remain.
    Undone,
    /// Undo consumed the last checkpoint and cleared the time origin.
    HistoryExhausted,
    NothingToUndo,
    Reset,
    Rebased(RebaseOutcome),
}

/// Counters, undo history and action log of one session.
#[derive(Debug)]
pub struct SessionState<C: Clock = SystemClock> {
    clock: C,
    counters: CounterBank,
    history: HistoryStack,
    log: ActionLog,
}

impl Default for SessionState<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> SessionState<C> {
    pub fn new(clock: C) -> Self {
        let counters = CounterBank::new();
        let mut history = HistoryStack::new();
        history.push_baseline(counters.snapshot());
        Self {
            clock,
            counters,
            history,
            log: ActionLog::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn counters(&self) -> &CounterBank {
        &self.counters
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn value(&self, id: CounterId) -> u64 {
        self.counters.get(id)
    }

    pub fn summary(&self, selection: &[CounterId]) -> String {
        summary(&self.counters, selection)
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        debug!("dispatch {:?}", action);
        match action {
            Action::Increment(id) => {
                self.record(Some(id), ActionKind::Increment);
                self.counters.increment(id);
                Outcome::Applied
            }
            Action::Decrement(id) => {
                self.record(Some(id), ActionKind::Decrement);
                self.counters.decrement(id);
                Outcome::Applied
            }
            Action::Clear(id) => {
                self.record(Some(id), ActionKind::Clear);
                self.counters.clear(id);
                Outcome::Applied
            }
            Action::ClearAll => {
                self.record(None, ActionKind::ClearAll);
                self.counters.clear_all();
                Outcome::Applied
            }
            Action::Undo => self.undo(),
            Action::ResetLogAndCounters => {
                self.reset();
                Outcome::Reset
            }
            Action::StartStreamReset => {
                self.reset();
                let now = self.clock.now();
                self.log.append(now, None, ActionKind::StreamStart);
                Outcome::Reset
            }
            Action::RebaseStartTime(origin) => {
                let now = self.clock.now();
                let outcome = self.log.rebase(origin, now);
                info!("log rebased to {} ({:?})", origin, outcome);
                Outcome::Rebased(outcome)
            }
        }
    }

    fn record(&mut self, counter: Option<CounterId>, kind: ActionKind) {
        self.history.push(self.counters.snapshot());
        let now = self.clock.now();
        self.log.append(now, counter, kind);
    }

    fn undo(&mut self) -> Outcome {
        let Some(step) = self.history.pop_for_undo() else {
            debug!("undo: history empty");
            return Outcome::NothingToUndo;
        };

        let checkpoint = step.checkpoint();
        self.counters.restore(&checkpoint.snapshot);
        // the baseline has no log entry of its own
        if checkpoint.kind == CheckpointKind::Action {
            self.log.pop_last();
        }

        match step {
            UndoStep::Restore(_) => Outcome::Undone,
            UndoStep::Exhausted(_) => {
                self.log.clear_origin();
                info!("undo history exhausted; time origin cleared");
                Outcome::HistoryExhausted
            }
        }
    }

    /// Hard reset. Checkpoints from before the reset are discarded, so undo
    /// can never bring back pre-reset counters.
    fn reset(&mut self) {
        info!("reset log, counters and undo history");
        self.log.clear();
        self.counters.clear_all();
        self.history.reset_to_baseline(self.counters.snapshot());
    }
}
