//! Named counters and their snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterId {
    Cold,
    Shock,
    Hot,
    Herb,
}

impl CounterId {
    pub const COUNT: usize = 4;

    pub const ALL: [CounterId; Self::COUNT] = [
        CounterId::Cold,
        CounterId::Shock,
        CounterId::Hot,
        CounterId::Herb,
    ];

    /// Symbol prefixed to log labels and summary items.
    pub fn symbol(self) -> &'static str {
        match self {
            CounterId::Cold => "🥶",
            CounterId::Shock => "⚡\u{fe0f}",
            CounterId::Hot => "🥵",
            CounterId::Herb => "🌿",
        }
    }

    /// 1-based position on screen.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn index(self) -> usize {
        match self {
            CounterId::Cold => 0,
            CounterId::Shock => 1,
            CounterId::Hot => 2,
            CounterId::Herb => 3,
        }
    }

    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            CounterId::Cold => "cold",
            CounterId::Shock => "shock",
            CounterId::Hot => "hot",
            CounterId::Herb => "herb",
        }
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable copy of every counter value at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSnapshot {
    values: Vec<(CounterId, u64)>,
}

impl CounterSnapshot {
    pub fn new(values: Vec<(CounterId, u64)>) -> Self {
        Self { values }
    }

    pub fn get(&self, id: CounterId) -> Option<u64> {
        self.values
            .iter()
            .find(|(counter, _)| *counter == id)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CounterId, u64)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Live counter values. Values never drop below zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterBank {
    values: [u64; CounterId::COUNT],
}

impl CounterBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: CounterId) -> u64 {
        self.values[id.index()]
    }

    pub fn increment(&mut self, id: CounterId) {
        let value = &mut self.values[id.index()];
        *value = value.saturating_add(1);
    }

    pub fn decrement(&mut self, id: CounterId) {
        let value = &mut self.values[id.index()];
        *value = value.saturating_sub(1);
    }

    pub fn clear(&mut self, id: CounterId) {
        self.values[id.index()] = 0;
    }

    pub fn clear_all(&mut self) {
        self.values = Default::default();
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot::new(self.iter().collect())
    }

    /// Apply every value recorded in `snapshot`. Counters it does not mention
    /// keep their current value.
    pub fn restore(&mut self, snapshot: &CounterSnapshot) {
        for (id, value) in snapshot.iter() {
            self.values[id.index()] = value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CounterId, u64)> + '_ {
        CounterId::ALL.iter().map(|id| (*id, self.get(*id)))
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }
}
