//! Event management routes.
//!
//! Every read path refreshes the derived lifecycle status before
//! returning, so clients always see the status implied by today's date.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use eventra_core::status::EventStatus;
use eventra_db::{
    entities::events,
    repositories::event::{CreateEventInput, EventError, EventRepository, UpdateEventInput},
};

/// Creates the event routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events", post(create_event))
        .route("/events/{event_id}", get(get_event))
        .route("/events/{event_id}", patch(update_event))
        .route("/events/{event_id}", delete(delete_event))
        .route("/events/{event_id}/refresh-status", post(refresh_status))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating an event.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
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

/// Query parameters for the event list.
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsParams {
    /// Restrict the list to one status.
    pub status: Option<String>,
}

/// Request body for updating an event.
///
/// PATCH semantics: absent fields stay untouched. The document links
/// distinguish "absent" from "explicit null": sending `null` clears them.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
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
    /// New status: planning, running, completed, canceled.
    pub status: Option<String>,
    /// New outcome summary.
    pub outcome_summary: Option<String>,
    /// New script link; `null` clears it.
    #[serde(default, deserialize_with = "nullable_field")]
    pub script_link: Option<Option<String>>,
    /// New timeline link; `null` clears it.
    #[serde(default, deserialize_with = "nullable_field")]
    pub timeline_link: Option<Option<String>>,
}

/// Deserializes a field where an explicit `null` means "clear".
///
/// A missing field falls back to the `#[serde(default)]` (outer `None`);
/// a present field, including `null`, lands in `Some(..)`.
fn nullable_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;
    Option::<String>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Converts a persisted event status to its wire string.
fn status_to_string(status: &eventra_db::entities::sea_orm_active_enums::EventStatus) -> String {
    EventStatus::from(status.clone()).to_string()
}

/// Builds the JSON representation of an event.
fn event_response(event: &events::Model) -> serde_json::Value {
    json!({
        "id": event.id,
        "name": event.name,
        "organizer": event.organizer,
        "start_date": event.start_date.map(|d| d.to_rfc3339()),
        "location": event.location,
        "format": event.format,
        "script_link": event.script_link,
        "timeline_link": event.timeline_link,
        "status": status_to_string(&event.status),
        "outcome_summary": event.outcome_summary,
        "created_at": event.created_at.to_rfc3339(),
    })
}

/// Maps repository errors to HTTP responses.
fn map_event_error(e: &EventError) -> axum::response::Response {
    match e {
        EventError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Event not found: {id}")
            })),
        )
            .into_response(),
        EventError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/events` - List all events, derived statuses refreshed.
///
/// An optional `status` query parameter filters the list. Both paths run
/// the same refresh pass first, so the filter sees refreshed statuses.
async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> impl IntoResponse {
    let repo = EventRepository::new((*state.db).clone());

    let today = state.clock.today_utc();

    let result = match params.status.as_deref() {
        None => repo.list(today).await,
        Some(s) => match s.parse::<EventStatus>() {
            Ok(status) => repo.list_by_status(status, today).await,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Invalid status. Must be one of: planning, running, completed, canceled"
                    })),
                )
                    .into_response();
            }
        },
    };

    match result {
        Ok(events) => {
            let response: Vec<serde_json::Value> = events.iter().map(event_response).collect();
            (StatusCode::OK, Json(json!({ "events": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list events");
            map_event_error(&e)
        }
    }
}

/// GET `/events/{event_id}` - Get one event, its derived status refreshed.
async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EventRepository::new((*state.db).clone());
    let today = state.clock.today_utc();

    match repo.get(event_id, today).await {
        Ok(event) => (StatusCode::OK, Json(event_response(&event))).into_response(),
        Err(e) => {
            error!(error = %e, event_id = %event_id, "Failed to get event");
            map_event_error(&e)
        }
    }
}

/// POST `/events` - Create a new event. New events start in Planning.
async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Event name must not be empty"
            })),
        )
            .into_response();
    }

    let repo = EventRepository::new((*state.db).clone());

    let input = CreateEventInput {
        name: payload.name,
        organizer: payload.organizer,
        start_date: payload.start_date,
        location: payload.location,
        format: payload.format,
        script_link: payload.script_link,
        timeline_link: payload.timeline_link,
    };

    match repo.create(input).await {
        Ok(event) => {
            info!(event_id = %event.id, name = %event.name, "Event created");
            (StatusCode::CREATED, Json(event_response(&event))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create event");
            map_event_error(&e)
        }
    }
}

/// PATCH `/events/{event_id}` - Update an event with PATCH semantics.
async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> impl IntoResponse {
    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Event name must not be empty"
            })),
        )
            .into_response();
    }

    let status = match payload.status.as_deref() {
        None => None,
        Some(s) => match s.parse::<EventStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Invalid status. Must be one of: planning, running, completed, canceled"
                    })),
                )
                    .into_response();
            }
        },
    };

    let repo = EventRepository::new((*state.db).clone());

    let input = UpdateEventInput {
        name: payload.name,
        organizer: payload.organizer,
        start_date: payload.start_date,
        location: payload.location,
        format: payload.format,
        status,
        outcome_summary: payload.outcome_summary,
        script_link: payload.script_link,
        timeline_link: payload.timeline_link,
    };

    match repo.update(event_id, input).await {
        Ok(event) => {
            info!(event_id = %event.id, "Event updated");
            (StatusCode::OK, Json(event_response(&event))).into_response()
        }
        Err(e) => {
            error!(error = %e, event_id = %event_id, "Failed to update event");
            map_event_error(&e)
        }
    }
}

/// DELETE `/events/{event_id}` - Delete an event and its dependents.
async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EventRepository::new((*state.db).clone());

    match repo.delete(event_id).await {
        Ok(()) => {
            info!(event_id = %event_id, "Event deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, event_id = %event_id, "Failed to delete event");
            map_event_error(&e)
        }
    }
}

/// POST `/events/{event_id}/refresh-status` - Recompute the derived status.
async fn refresh_status(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EventRepository::new((*state.db).clone());
    let today = state.clock.today_utc();

    match repo.refresh_status(event_id, today).await {
        Ok(event) => (StatusCode::OK, Json(event_response(&event))).into_response(),
        Err(e) => {
            error!(error = %e, event_id = %event_id, "Failed to refresh event status");
            map_event_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_absent_from_null() {
        let req: UpdateEventRequest = serde_json::from_str(r#"{"name": "Gala"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Gala"));
        assert!(req.script_link.is_none());

        let req: UpdateEventRequest = serde_json::from_str(r#"{"script_link": null}"#).unwrap();
        assert_eq!(req.script_link, Some(None));

        let req: UpdateEventRequest =
            serde_json::from_str(r#"{"script_link": "https://docs.example.com/s"}"#).unwrap();
        assert_eq!(
            req.script_link,
            Some(Some("https://docs.example.com/s".to_string()))
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("canceled".parse::<EventStatus>(), Ok(EventStatus::Canceled));
        assert!("cancelled".parse::<EventStatus>().is_err());
    }
}
