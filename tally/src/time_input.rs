//! The three-field `HH:MM:SS` editor used to set the stream start time.
//!
//! Field text is kept exactly as typed; it is only interpreted when stepped or
//! applied, so a half-typed value never blocks the user.

use chrono::{DateTime, Local, Timelike};
use tally_core::ReferenceTime;
use tally_core::time_format::parse_field;

const FIELD_WIDTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
    Second,
}

impl TimeField {
    pub const ALL: [TimeField; 3] = [TimeField::Hour, TimeField::Minute, TimeField::Second];

    fn index(self) -> usize {
        match self {
            TimeField::Hour => 0,
            TimeField::Minute => 1,
            TimeField::Second => 2,
        }
    }

    fn max(self) -> u32 {
        match self {
            TimeField::Hour => 23,
            TimeField::Minute | TimeField::Second => 59,
        }
    }

    fn next(self) -> Self {
        match self {
            TimeField::Hour => TimeField::Minute,
            TimeField::Minute | TimeField::Second => TimeField::Second,
        }
    }

    fn previous(self) -> Self {
        match self {
            TimeField::Hour | TimeField::Minute => TimeField::Hour,
            TimeField::Second => TimeField::Minute,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeInput {
    fields: [String; 3],
    focus: TimeField,
}

impl TimeInput {
    /// Suggest the closest full hour: the current one, or the next one once
    /// past the half hour.
    pub fn initial(now: &DateTime<Local>) -> Self {
        let hour = if now.minute() > 30 {
            (now.hour() + 1) % 24
        } else {
            now.hour()
        };
        Self {
            fields: [format!("{hour:02}"), "00".to_string(), "00".to_string()],
            focus: TimeField::Hour,
        }
    }

    pub fn focus(&self) -> TimeField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn text(&self, field: TimeField) -> &str {
        &self.fields[field.index()]
    }

    /// Step the focused field by `delta`, wrapping around its range.
    pub fn step(&mut self, delta: i64) {
        let field = self.focus;
        let modulus = i64::from(field.max()) + 1;
        let value = i64::from(parse_field(self.text(field), field.max()));
        let stepped = (value + delta).rem_euclid(modulus);
        self.fields[field.index()] = format!("{stepped:02}");
    }

    /// Type a digit into the focused field. A full field starts over.
    pub fn push_digit(&mut self, ch: char) {
        if !ch.is_ascii_digit() {
            return;
        }
        let text = &mut self.fields[self.focus.index()];
        if text.chars().count() >= FIELD_WIDTH {
            text.clear();
        }
        text.push(ch);
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus.index()].pop();
    }

    pub fn reference_time(&self) -> ReferenceTime {
        ReferenceTime::from_fields(
            self.text(TimeField::Hour),
            self.text(TimeField::Minute),
            self.text(TimeField::Second),
        )
    }

    /// Rewrite every field as the zero-padded value it will be applied as.
    pub fn normalize(&mut self) {
        let time = self.reference_time();
        self.fields = [
            format!("{:02}", time.hour),
            format!("{:02}", time.minute),
            format!("{:02}", time.second),
        ];
    }
}
