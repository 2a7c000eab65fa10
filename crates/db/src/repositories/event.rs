//! Event repository.
//!
//! Reads refresh the derived lifecycle status before returning: the list
//! path recomputes every event and persists all changes in one transaction,
//! the single-event path refreshes just that row. Both go through
//! `eventra_core::status::derive_status` so they can never disagree.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use eventra_core::status::{EventStatus, StatusDecision, derive_status};

use crate::entities::{events, sea_orm_active_enums::EventStatus as DbEventStatus};

/// Error types for event operations.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Event not found.
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an event.
#[derive(Debug, Clone)]
pub struct CreateEventInput {
    /// Event name.
    pub name: String,
    /// Organizing party.
    pub organizer: Option<String>,
    /// Scheduled date.
    pub start_date: Option<DateTime<Utc>>,
    /// Venue.
    pub location: Option<String>,
    /// Event format (offline, online, hybrid, ...).
    pub format: Option<String>,
    /// Link to the event script document.
    pub script_link: Option<String>,
    /// Link to the timeline document.
    pub timeline_link: Option<String>,
}

/// Input for updating an event.
///
/// PATCH semantics: `None` leaves a field untouched. The document links use
/// a double `Option` so callers can clear them explicitly.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventInput {
    /// New name.
    pub name: Option<String>,
    /// New organizer.
    pub organizer: Option<String>,
    /// New scheduled date.
    pub start_date: Option<DateTime<Utc>>,
    /// New venue.
    pub location: Option<String>,
    /// New format.
    pub format: Option<String>,
    /// New status (manual edit, including Canceled).
    pub status: Option<EventStatus>,
    /// New outcome summary.
    pub outcome_summary: Option<String>,
    /// New script link; `Some(None)` clears it.
    pub script_link: Option<Option<String>>,
    /// New timeline link; `Some(None)` clears it.
    pub timeline_link: Option<Option<String>>,
}

/// Event repository for CRUD and status refresh operations.
#[derive(Debug, Clone)]
pub struct EventRepository {
    db: DatabaseConnection,
}

impl EventRepository {
    /// Creates a new event repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new event. New events start in Planning.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, input: CreateEventInput) -> Result<events::Model, EventError> {
        let event = events::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            organizer: Set(input.organizer),
            start_date: Set(input.start_date.map(Into::into)),
            location: Set(input.location),
            format: Set(input.format),
            script_link: Set(input.script_link),
            timeline_link: Set(input.timeline_link),
            status: Set(DbEventStatus::Planning),
            outcome_summary: Set(None),
            created_at: Set(Utc::now().into()),
        };

        Ok(event.insert(&self.db).await?)
    }

    /// Gets an event by ID, refreshing its derived status first.
    ///
    /// # Errors
    ///
    /// Returns `EventError::NotFound` if the event does not exist.
    pub async fn get(&self, event_id: Uuid, today: NaiveDate) -> Result<events::Model, EventError> {
        let event = events::Entity::find_by_id(event_id)
            .one(&self.db)
            .await?
            .ok_or(EventError::NotFound(event_id))?;

        self.apply_derived_status(event, today).await
    }

    /// Lists all events, newest first, refreshing derived statuses in one
    /// batched pass before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query or the batched write fails.
    pub async fn list(&self, today: NaiveDate) -> Result<Vec<events::Model>, EventError> {
        let mut events_list = events::Entity::find()
            .order_by_desc(events::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut changed: Vec<(Uuid, DbEventStatus)> = Vec::new();
        for event in &mut events_list {
            if let StatusDecision::Update(new_status) =
                Self::decide(event, today)
            {
                event.status = new_status.into();
                changed.push((event.id, event.status.clone()));
            }
        }

        // One transaction for the whole pass, not one write per event.
        if !changed.is_empty() {
            let count = changed.len();
            let txn = self.db.begin().await?;
            for (id, status) in changed {
                let update = events::ActiveModel {
                    id: Set(id),
                    status: Set(status),
                    ..Default::default()
                };
                update.update(&txn).await?;
            }
            txn.commit().await?;
            info!(count, "Refreshed derived event statuses");
        }

        Ok(events_list)
    }

    /// Recomputes and persists one event's derived status.
    ///
    /// This backs the explicit "refresh status" action and the single-event
    /// fetch path.
    ///
    /// # Errors
    ///
    /// Returns `EventError::NotFound` if the event does not exist.
    pub async fn refresh_status(
        &self,
        event_id: Uuid,
        today: NaiveDate,
    ) -> Result<events::Model, EventError> {
        self.get(event_id, today).await
    }

    /// Updates an event with PATCH semantics.
    ///
    /// # Errors
    ///
    /// Returns `EventError::NotFound` if the event does not exist.
    pub async fn update(
        &self,
        event_id: Uuid,
        input: UpdateEventInput,
    ) -> Result<events::Model, EventError> {
        let event = events::Entity::find_by_id(event_id)
            .one(&self.db)
            .await?
            .ok_or(EventError::NotFound(event_id))?;

        let mut active: events::ActiveModel = event.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(organizer) = input.organizer {
            active.organizer = Set(Some(organizer));
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(Some(start_date.into()));
        }
        if let Some(location) = input.location {
            active.location = Set(Some(location));
        }
        if let Some(format) = input.format {
            active.format = Set(Some(format));
        }
        if let Some(status) = input.status {
            active.status = Set(status.into());
        }
        if let Some(outcome_summary) = input.outcome_summary {
            active.outcome_summary = Set(Some(outcome_summary));
        }
        if let Some(script_link) = input.script_link {
            active.script_link = Set(script_link);
        }
        if let Some(timeline_link) = input.timeline_link {
            active.timeline_link = Set(timeline_link);
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes an event. Finance lines, tasks, and staff assignments go with
    /// it via the database cascade.
    ///
    /// # Errors
    ///
    /// Returns `EventError::NotFound` if the event does not exist.
    pub async fn delete(&self, event_id: Uuid) -> Result<(), EventError> {
        let result = events::Entity::delete_by_id(event_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(EventError::NotFound(event_id));
        }
        Ok(())
    }

    /// Lists events with one status, after the same batched refresh pass as
    /// [`Self::list`]. Filtering happens on the refreshed statuses, so an
    /// event whose scheduled date has passed never shows up under its stale
    /// persisted status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_status(
        &self,
        status: EventStatus,
        today: NaiveDate,
    ) -> Result<Vec<events::Model>, EventError> {
        let db_status: DbEventStatus = status.into();
        let mut events_list = self.list(today).await?;
        events_list.retain(|event| event.status == db_status);
        Ok(events_list)
    }

    fn decide(event: &events::Model, today: NaiveDate) -> StatusDecision {
        derive_status(
            event.status.clone().into(),
            event.start_date.map(|d| d.with_timezone(&Utc)),
            today,
        )
    }

    async fn apply_derived_status(
        &self,
        mut event: events::Model,
        today: NaiveDate,
    ) -> Result<events::Model, EventError> {
        if let StatusDecision::Update(new_status) = Self::decide(&event, today) {
            event.status = new_status.into();
            let update = events::ActiveModel {
                id: Set(event.id),
                status: Set(event.status.clone()),
                ..Default::default()
            };
            update.update(&self.db).await?;
            info!(event_id = %event.id, status = %new_status, "Refreshed derived event status");
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(status: DbEventStatus, start_date: Option<DateTime<Utc>>) -> events::Model {
        events::Model {
            id: Uuid::new_v4(),
            name: "Annual Gathering".to_string(),
            organizer: None,
            start_date: start_date.map(Into::into),
            location: None,
            format: None,
            script_link: None,
            timeline_link: None,
            status,
            outcome_summary: None,
            created_at: Utc::now().into(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at_noon(date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_opt(12, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn test_past_event_moves_to_completed() {
        let e = event(DbEventStatus::Planning, Some(at_noon(day(2025, 3, 9))));
        assert_eq!(
            EventRepository::decide(&e, day(2025, 3, 10)),
            StatusDecision::Update(EventStatus::Completed)
        );
    }

    #[test]
    fn test_current_status_is_not_rewritten() {
        let e = event(DbEventStatus::Running, Some(at_noon(day(2025, 3, 10))));
        assert_eq!(
            EventRepository::decide(&e, day(2025, 3, 10)),
            StatusDecision::Unchanged
        );
    }

    #[test]
    fn test_canceled_event_stays_canceled() {
        let e = event(DbEventStatus::Canceled, Some(at_noon(day(2025, 3, 9))));
        assert_eq!(
            EventRepository::decide(&e, day(2025, 3, 10)),
            StatusDecision::Unchanged
        );
    }

    #[test]
    fn test_unscheduled_event_is_untouched() {
        let e = event(DbEventStatus::Planning, None);
        assert_eq!(
            EventRepository::decide(&e, day(2025, 3, 10)),
            StatusDecision::Unchanged
        );
    }

    // `list_by_status` filters after the refresh pass. An event scheduled
    // yesterday but still persisted as planning must land in the completed
    // bucket, never in the planning one.
    #[test]
    fn test_status_filter_sees_refreshed_statuses() {
        let today = day(2025, 3, 10);
        let mut rows = vec![
            event(DbEventStatus::Planning, Some(at_noon(day(2025, 3, 9)))),
            event(DbEventStatus::Planning, Some(at_noon(day(2025, 3, 20)))),
        ];
        for row in &mut rows {
            if let StatusDecision::Update(new_status) = EventRepository::decide(row, today) {
                row.status = new_status.into();
            }
        }

        let planning: Vec<_> = rows
            .iter()
            .filter(|e| e.status == DbEventStatus::Planning)
            .collect();
        assert_eq!(planning.len(), 1);
        assert_eq!(planning[0].start_date.unwrap().date_naive(), day(2025, 3, 20));

        let completed: Vec<_> = rows
            .iter()
            .filter(|e| e.status == DbEventStatus::Completed)
            .collect();
        assert_eq!(completed.len(), 1);
    }
}
