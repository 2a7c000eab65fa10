//! Finance summary aggregation.
//!
//! Deterministic, order-independent rollup of an event's finance lines.
//! Amounts are exact decimals; negative values pass through unclamped since
//! input validation belongs to the API boundary, not the aggregator.

use rust_decimal::Decimal;

use eventra_shared::types::EventId;

use super::types::{FinanceLine, FinanceSummary, ResolvedFinanceLine};

/// Display name used when a line has neither a catalog link nor free text.
pub const FALLBACK_SERVICE_LABEL: &str = "N/A";

/// Resolves the display name for a line.
///
/// The linked catalog service's name wins over the line's own free text;
/// a line with neither gets the fallback label.
fn resolve_name(line: &FinanceLine) -> String {
    line.catalog_name
        .clone()
        .or_else(|| line.service_name.clone())
        .unwrap_or_else(|| FALLBACK_SERVICE_LABEL.to_string())
}

/// Computes the finance summary for one event.
#[must_use]
pub fn summarize(event_id: EventId, lines: Vec<FinanceLine>) -> FinanceSummary {
    let estimated_total: Decimal = lines.iter().map(|l| l.estimated_amount).sum();
    let extra_total: Decimal = lines.iter().map(|l| l.extra_amount).sum();

    let items: Vec<ResolvedFinanceLine> = lines
        .into_iter()
        .map(|line| ResolvedFinanceLine {
            id: line.id,
            service_name: resolve_name(&line),
            estimated_amount: line.estimated_amount,
            extra_amount: line.extra_amount,
            total: line.total(),
            estimated_note: line.estimated_note,
            extra_note: line.extra_note,
        })
        .collect();

    FinanceSummary {
        event_id,
        estimated_total,
        extra_total,
        grand_total: estimated_total + extra_total,
        item_count: items.len(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventra_shared::types::{FinanceLineId, ServiceId};
    use rust_decimal_macros::dec;

    fn line(estimated: Decimal, extra: Decimal) -> FinanceLine {
        FinanceLine {
            id: FinanceLineId::new(),
            service_id: None,
            service_name: None,
            catalog_name: None,
            estimated_amount: estimated,
            estimated_note: None,
            extra_amount: extra,
            extra_note: None,
        }
    }

    #[test]
    fn test_summary_totals() {
        let lines = vec![
            line(dec!(1_000_000), dec!(200_000)),
            line(dec!(500_000), dec!(0)),
        ];

        let summary = summarize(EventId::new(), lines);

        assert_eq!(summary.estimated_total, dec!(1_500_000));
        assert_eq!(summary.extra_total, dec!(200_000));
        assert_eq!(summary.grand_total, dec!(1_700_000));
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.items.len(), 2);
    }

    #[test]
    fn test_empty_collection_yields_zero_summary() {
        let summary = summarize(EventId::new(), Vec::new());

        assert_eq!(summary.estimated_total, Decimal::ZERO);
        assert_eq!(summary.extra_total, Decimal::ZERO);
        assert_eq!(summary.grand_total, Decimal::ZERO);
        assert_eq!(summary.item_count, 0);
        assert!(summary.items.is_empty());
    }

    #[test]
    fn test_line_totals() {
        let summary = summarize(EventId::new(), vec![line(dec!(100.50), dec!(25.25))]);

        assert_eq!(summary.items[0].total, dec!(125.75));
        assert_eq!(summary.grand_total, dec!(125.75));
    }

    #[test]
    fn test_catalog_name_wins_over_free_text() {
        let mut l = line(dec!(10), dec!(0));
        l.service_id = Some(ServiceId::new());
        l.catalog_name = Some("Sound System".to_string());
        l.service_name = Some("my own label".to_string());

        let summary = summarize(EventId::new(), vec![l]);
        assert_eq!(summary.items[0].service_name, "Sound System");
    }

    #[test]
    fn test_free_text_used_without_catalog_link() {
        let mut l = line(dec!(10), dec!(0));
        l.service_name = Some("Custom Decor".to_string());

        let summary = summarize(EventId::new(), vec![l]);
        assert_eq!(summary.items[0].service_name, "Custom Decor");
    }

    #[test]
    fn test_fallback_label_when_unnamed() {
        let summary = summarize(EventId::new(), vec![line(dec!(10), dec!(0))]);
        assert_eq!(summary.items[0].service_name, FALLBACK_SERVICE_LABEL);
    }

    #[test]
    fn test_negative_amounts_pass_through() {
        // A correction/discount line sums as given, no clamping.
        let lines = vec![line(dec!(1000), dec!(0)), line(dec!(-250), dec!(-50))];

        let summary = summarize(EventId::new(), lines);
        assert_eq!(summary.estimated_total, dec!(750));
        assert_eq!(summary.extra_total, dec!(-50));
        assert_eq!(summary.grand_total, dec!(700));
    }

    #[test]
    fn test_notes_are_carried_through() {
        let mut l = line(dec!(10), dec!(5));
        l.estimated_note = Some("venue deposit".to_string());
        l.extra_note = Some("late surcharge".to_string());

        let summary = summarize(EventId::new(), vec![l]);
        assert_eq!(summary.items[0].estimated_note.as_deref(), Some("venue deposit"));
        assert_eq!(summary.items[0].extra_note.as_deref(), Some("late surcharge"));
    }
}
