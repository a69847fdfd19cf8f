use std::time::{Duration, Instant};
use tally_core::CounterId;

/// Counters whose values go into the summary, kept in screen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    selected: [bool; CounterId::COUNT],
}

impl Selection {
    pub fn from_ids(ids: &[CounterId]) -> Self {
        let mut selection = Self::default();
        for id in ids {
            selection.selected[id.index()] = true;
        }
        selection
    }

    pub fn toggle(&mut self, id: CounterId) {
        let slot = &mut self.selected[id.index()];
        *slot = !*slot;
    }

    pub fn contains(&self, id: CounterId) -> bool {
        self.selected[id.index()]
    }

    /// Selected counters in screen order, regardless of toggle order.
    pub fn ids(&self) -> Vec<CounterId> {
        CounterId::ALL
            .into_iter()
            .filter(|id| self.contains(*id))
            .collect()
    }
}

/// A short message shown under the log until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub text: String,
    pub expires_at: Instant,
}

impl Advisory {
    pub fn new(text: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + lifetime,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
