use crate::counter::{CounterBank, CounterId};

/// Separator between summary items (full-width solidus).
pub const SUMMARY_SEPARATOR: &str = "／";

/// `symbol+count` for each selected counter, in the order given.
pub fn summary(bank: &CounterBank, selection: &[CounterId]) -> String {
    selection
        .iter()
        .map(|id| format!("{}{}", id.symbol(), bank.get(*id)))
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_with(values: [u64; 4]) -> CounterBank {
        let mut bank = CounterBank::new();
        for (id, value) in CounterId::ALL.into_iter().zip(values) {
            for _ in 0..value {
                bank.increment(id);
            }
        }
        bank
    }

    #[test]
    fn test_summary_of_selection() {
        let bank = bank_with([3, 1, 4, 1]);
        assert_eq!(
            summary(&bank, &[CounterId::Cold, CounterId::Hot]),
            "🥶3／🥵4"
        );
    }

    #[test]
    fn test_summary_follows_selection_order() {
        let bank = bank_with([3, 1, 4, 1]);
        assert_eq!(
            summary(&bank, &[CounterId::Herb, CounterId::Shock]),
            "🌿1／⚡\u{fe0f}1"
        );
    }

    #[test]
    fn test_summary_empty_selection() {
        let bank = bank_with([3, 1, 4, 1]);
        assert_eq!(summary(&bank, &[]), "");
        assert_eq!(summary(&bank, &[CounterId::Shock]), "⚡\u{fe0f}1");
    }
}
