//! Property-based tests for status derivation.

use chrono::{DateTime, NaiveDate, Utc};
use proptest::prelude::*;

use super::derive::{EventStatus, StatusDecision, derive_status};

/// Strategy for an arbitrary calendar day in a sane range.
fn day_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for an arbitrary time of day on a given date.
fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (day_strategy(), 0u32..24, 0u32..60).prop_map(|(day, h, m)| {
        day.and_hms_opt(h, m, 0).unwrap().and_utc()
    })
}

fn status_strategy() -> impl Strategy<Value = EventStatus> {
    prop_oneof![
        Just(EventStatus::Planning),
        Just(EventStatus::Running),
        Just(EventStatus::Completed),
    ]
}

fn resolve(current: EventStatus, decision: StatusDecision) -> EventStatus {
    decision.new_status().unwrap_or(current)
}

proptest! {
    /// The derived status depends only on the day ordering: strictly future
    /// days derive Planning, the same day Running, strictly past Completed.
    #[test]
    fn prop_derived_status_follows_day_ordering(
        current in status_strategy(),
        scheduled in timestamp_strategy(),
        today in day_strategy(),
    ) {
        let derived = resolve(current, derive_status(current, Some(scheduled), today));

        let expected = match scheduled.date_naive().cmp(&today) {
            std::cmp::Ordering::Greater => EventStatus::Planning,
            std::cmp::Ordering::Equal => EventStatus::Running,
            std::cmp::Ordering::Less => EventStatus::Completed,
        };
        prop_assert_eq!(derived, expected);
    }

    /// Applying derivation twice with the same "today" changes nothing the
    /// second time.
    #[test]
    fn prop_derivation_is_idempotent(
        current in status_strategy(),
        scheduled in timestamp_strategy(),
        today in day_strategy(),
    ) {
        let once = resolve(current, derive_status(current, Some(scheduled), today));
        prop_assert_eq!(
            derive_status(once, Some(scheduled), today),
            StatusDecision::Unchanged
        );
    }

    /// Time of day never influences the outcome; only the calendar day does.
    #[test]
    fn prop_time_of_day_is_irrelevant(
        current in status_strategy(),
        day in day_strategy(),
        today in day_strategy(),
        hour in 0u32..24,
    ) {
        let midnight = day.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let later = day.and_hms_opt(hour, 59, 59).unwrap().and_utc();

        prop_assert_eq!(
            derive_status(current, Some(midnight), today),
            derive_status(current, Some(later), today)
        );
    }

    /// Canceled events are never auto-transitioned, whatever the dates say.
    #[test]
    fn prop_canceled_is_never_overwritten(
        scheduled in timestamp_strategy(),
        today in day_strategy(),
    ) {
        prop_assert_eq!(
            derive_status(EventStatus::Canceled, Some(scheduled), today),
            StatusDecision::Unchanged
        );
    }

    /// Without a scheduled date there is nothing to derive.
    #[test]
    fn prop_missing_date_is_unchanged(
        current in status_strategy(),
        today in day_strategy(),
    ) {
        prop_assert_eq!(derive_status(current, None, today), StatusDecision::Unchanged);
    }
}
