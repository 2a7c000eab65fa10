//! Per-event finance aggregation.

pub mod summary;
pub mod types;

#[cfg(test)]
mod tests;

pub use summary::{FALLBACK_SERVICE_LABEL, summarize};
pub use types::{FinanceLine, FinanceSummary, ResolvedFinanceLine};
