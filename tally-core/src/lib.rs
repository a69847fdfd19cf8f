//! State engine for the tally counter: counters, bounded undo history and the
//! elapsed-time action log, coordinated by [`SessionState::dispatch`].

pub mod action_log;
pub mod clock;
pub mod counter;
pub mod dispatch;
pub mod history;
pub mod summary;
pub mod time_format;

pub use action_log::{ActionKind, ActionLog, LogEntry, RebaseOutcome};
pub use clock::{Clock, ManualClock, SystemClock};
pub use counter::{CounterBank, CounterId, CounterSnapshot};
pub use dispatch::{Action, Outcome, SessionState};
pub use history::{HistoryStack, MAX_HISTORY};
pub use summary::{SUMMARY_SEPARATOR, summary};
pub use time_format::{ReferenceTime, format_elapsed, format_timestamp};
