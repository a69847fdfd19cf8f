//! Timestamped action log with a rebasable time origin.

use crate::counter::CounterId;
use crate::time_format::{format_elapsed, format_timestamp};
use chrono::{DateTime, Local, TimeDelta, Timelike};
use std::fmt;
use tracing::debug;

/// Marker prefixed to entries that are not tied to a single counter.
pub const SESSION_MARKER: &str = "👻";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Increment,
    Decrement,
    Clear,
    ClearAll,
    StreamStart,
}

impl ActionKind {
    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::Increment => "+1",
            ActionKind::Decrement => "-1",
            ActionKind::Clear => "Clear",
            ActionKind::ClearAll => "👻Clear",
            ActionKind::StreamStart => "👻Start",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: DateTime<Local>,
    elapsed: TimeDelta,
    counter: Option<CounterId>,
    kind: ActionKind,
}

impl LogEntry {
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.elapsed
    }

    pub fn counter(&self) -> Option<CounterId> {
        self.counter
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn elapsed_text(&self) -> String {
        format_elapsed(self.elapsed)
    }

    /// Symbol of the counter (if any) followed by the action tag.
    pub fn label(&self) -> String {
        let symbol = self.counter.map(CounterId::symbol).unwrap_or_default();
        format!("{symbol}{}", self.kind.tag())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            format_timestamp(&self.timestamp),
            self.elapsed_text(),
            self.label()
        )
    }
}

/// What [`ActionLog::rebase`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebaseOutcome {
    /// Existing entries were recomputed against the new origin.
    Rebased(usize),
    /// The log was empty; a stream-start entry was written.
    Bootstrapped,
}

#[derive(Debug, Default, Clone)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
    origin: Option<DateTime<Local>>,
}

fn whole_seconds(instant: DateTime<Local>) -> DateTime<Local> {
    instant.with_nanosecond(0).unwrap_or(instant)
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Option<DateTime<Local>> {
        self.origin
    }

    /// Forget the origin. The next append captures a fresh one.
    pub fn clear_origin(&mut self) {
        self.origin = None;
    }

    /// Append an entry at `instant`. The first append without an origin makes
    /// that instant the origin.
    pub fn append(
        &mut self,
        instant: DateTime<Local>,
        counter: Option<CounterId>,
        kind: ActionKind,
    ) -> &LogEntry {
        let timestamp = whole_seconds(instant);
        let origin = *self.origin.get_or_insert(timestamp);
        let entry = LogEntry {
            timestamp,
            elapsed: timestamp - origin,
            counter,
            kind,
        };
        debug!("log append {}", entry);
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Move the origin to `new_origin`, rewriting every elapsed field.
    ///
    /// On an empty log the origin is set and a stream-start entry stamped
    /// `now` is written instead.
    pub fn rebase(&mut self, new_origin: DateTime<Local>, now: DateTime<Local>) -> RebaseOutcome {
        let new_origin = whole_seconds(new_origin);
        self.origin = Some(new_origin);
        if self.entries.is_empty() {
            self.append(now, None, ActionKind::StreamStart);
            return RebaseOutcome::Bootstrapped;
        }
        for entry in &mut self.entries {
            entry.elapsed = entry.timestamp - new_origin;
        }
        RebaseOutcome::Rebased(self.entries.len())
    }

    /// Drop every entry and the origin.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.origin = None;
    }

    pub fn pop_last(&mut self) -> Option<LogEntry> {
        self.entries.pop()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// All entries as one newline-joined block.
    pub fn export(&self) -> String {
        self.lines().join("\n")
    }
}
