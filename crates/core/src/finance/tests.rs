//! Property-based tests for finance aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use eventra_shared::types::{EventId, FinanceLineId};

use super::summary::summarize;
use super::types::FinanceLine;

/// Strategy for amounts with two decimal places, including negatives
/// (corrections/discounts are pass-through values).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn line_strategy() -> impl Strategy<Value = FinanceLine> {
    (
        amount_strategy(),
        amount_strategy(),
        proptest::option::of("[a-z]{1,12}"),
    )
        .prop_map(|(estimated, extra, name)| FinanceLine {
            id: FinanceLineId::new(),
            service_id: None,
            service_name: name,
            catalog_name: None,
            estimated_amount: estimated,
            estimated_note: None,
            extra_amount: extra,
            extra_note: None,
        })
}

fn lines_strategy() -> impl Strategy<Value = Vec<FinanceLine>> {
    proptest::collection::vec(line_strategy(), 0..32)
}

proptest! {
    /// Grand total equals estimated total plus extra total, and also the sum
    /// of per-line totals, under exact-decimal arithmetic.
    #[test]
    fn prop_grand_total_identity(lines in lines_strategy()) {
        let summary = summarize(EventId::new(), lines);

        prop_assert_eq!(
            summary.grand_total,
            summary.estimated_total + summary.extra_total
        );

        let line_total_sum: Decimal = summary.items.iter().map(|i| i.total).sum();
        prop_assert_eq!(summary.grand_total, line_total_sum);
    }

    /// Item count always matches the input length and the resolved list.
    #[test]
    fn prop_item_count_matches_input(lines in lines_strategy()) {
        let expected = lines.len();
        let summary = summarize(EventId::new(), lines);

        prop_assert_eq!(summary.item_count, expected);
        prop_assert_eq!(summary.items.len(), expected);
    }

    /// Permuting the input collection changes no aggregate field.
    #[test]
    fn prop_order_independence(lines in lines_strategy()) {
        let mut reversed = lines.clone();
        reversed.reverse();

        let event_id = EventId::new();
        let forward = summarize(event_id, lines);
        let backward = summarize(event_id, reversed);

        prop_assert_eq!(forward.estimated_total, backward.estimated_total);
        prop_assert_eq!(forward.extra_total, backward.extra_total);
        prop_assert_eq!(forward.grand_total, backward.grand_total);
        prop_assert_eq!(forward.item_count, backward.item_count);
    }

    /// Every resolved line has a non-empty display name.
    #[test]
    fn prop_display_name_is_always_resolved(lines in lines_strategy()) {
        let summary = summarize(EventId::new(), lines);

        for item in &summary.items {
            prop_assert!(!item.service_name.is_empty());
        }
    }
}
