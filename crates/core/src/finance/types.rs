//! Finance data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use eventra_shared::types::{EventId, FinanceLineId, ServiceId};

/// One finance line for an event, as materialized from storage.
///
/// `catalog_name` is the display name of the linked catalog service, already
/// resolved by the storage collaborator; the aggregator itself performs no
/// lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceLine {
    /// Line item ID.
    pub id: FinanceLineId,
    /// Linked catalog service, if any.
    pub service_id: Option<ServiceId>,
    /// Free-text service name carried on the line itself.
    pub service_name: Option<String>,
    /// Display name of the linked catalog service.
    pub catalog_name: Option<String>,
    /// Planned amount.
    pub estimated_amount: Decimal,
    /// Note on the planned amount.
    pub estimated_note: Option<String>,
    /// Overrun amount on top of the estimate.
    pub extra_amount: Decimal,
    /// Note on the overrun.
    pub extra_note: Option<String>,
}

impl FinanceLine {
    /// Line total: estimated plus extra.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.estimated_amount + self.extra_amount
    }
}

/// A finance line annotated with its resolved display name and total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedFinanceLine {
    /// Line item ID.
    pub id: FinanceLineId,
    /// Resolved display name (catalog name, free text, or fallback label).
    pub service_name: String,
    /// Planned amount.
    pub estimated_amount: Decimal,
    /// Overrun amount.
    pub extra_amount: Decimal,
    /// Line total.
    pub total: Decimal,
    /// Note on the planned amount.
    pub estimated_note: Option<String>,
    /// Note on the overrun.
    pub extra_note: Option<String>,
}

/// Computed, non-persisted aggregate of all finance lines for one event.
///
/// Every field is always present; an event without finance lines yields a
/// zero-valued summary with an empty item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceSummary {
    /// Owning event.
    pub event_id: EventId,
    /// Sum of estimated amounts.
    pub estimated_total: Decimal,
    /// Sum of extra amounts.
    pub extra_total: Decimal,
    /// Sum of line totals; always equals estimated plus extra totals.
    pub grand_total: Decimal,
    /// Number of line items.
    pub item_count: usize,
    /// The resolved line items.
    pub items: Vec<ResolvedFinanceLine>,
}
