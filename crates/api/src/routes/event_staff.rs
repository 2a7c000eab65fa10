//! Per-event staff assignment routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use eventra_db::{
    entities::event_staff,
    repositories::staff::{CreateEventStaffInput, StaffError, StaffRepository,
        UpdateEventStaffInput},
};

/// Creates the event staff routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/event-staff", post(create_assignment))
        .route("/event-staff/bulk", post(create_assignments_bulk))
        .route("/event-staff/{id}", get(get_assignment))
        .route("/event-staff/{id}", put(update_assignment))
        .route("/event-staff/{id}", delete(delete_assignment))
        .route("/event-staff/event/{event_id}", get(list_assignments))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for assigning a person to an event.
#[derive(Debug, Deserialize)]
pub struct CreateEventStaffRequest {
    /// Owning event.
    pub event_id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Staff type.
    pub staff_type: Option<String>,
    /// Task assigned for this event.
    pub assigned_task: Option<String>,
    /// Free-form note.
    pub note: Option<String>,
}

/// Request body for bulk-assigning people to one event.
#[derive(Debug, Deserialize)]
pub struct CreateEventStaffBulkRequest {
    /// Owning event.
    pub event_id: Uuid,
    /// Assignments to create.
    pub staff: Vec<EventStaffEntry>,
}

/// One entry in a bulk assignment request.
#[derive(Debug, Deserialize)]
pub struct EventStaffEntry {
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Staff type.
    pub staff_type: Option<String>,
    /// Task assigned for this event.
    pub assigned_task: Option<String>,
    /// Free-form note.
    pub note: Option<String>,
}

/// Request body for updating an assignment.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventStaffRequest {
    /// New full name.
    pub full_name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New staff type.
    pub staff_type: Option<String>,
    /// New assigned task.
    pub assigned_task: Option<String>,
    /// New note.
    pub note: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds the JSON representation of an assignment.
fn assignment_response(assignment: &event_staff::Model) -> serde_json::Value {
    json!({
        "id": assignment.id,
        "event_id": assignment.event_id,
        "full_name": assignment.full_name,
        "phone": assignment.phone,
        "department": assignment.department,
        "staff_type": assignment.staff_type,
        "assigned_task": assignment.assigned_task,
        "note": assignment.note,
        "created_at": assignment.created_at.to_rfc3339(),
    })
}

fn invalid_name_response() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_name",
            "message": "Full name must not be empty"
        })),
    )
        .into_response()
}

/// Maps repository errors to HTTP responses.
fn map_staff_error(e: &StaffError) -> axum::response::Response {
    match e {
        StaffError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Staff not found: {id}")
            })),
        )
            .into_response(),
        StaffError::AssignmentNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Staff assignment not found: {id}")
            })),
        )
            .into_response(),
        StaffError::EventNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "event_not_found",
                "message": format!("Event not found: {id}")
            })),
        )
            .into_response(),
        StaffError::Database(_) => (
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

/// GET `/event-staff/event/{event_id}` - List assignments, ordered by name.
async fn list_assignments(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = StaffRepository::new((*state.db).clone());

    match repo.list_assignments(event_id).await {
        Ok(assignments) => {
            let response: Vec<serde_json::Value> =
                assignments.iter().map(assignment_response).collect();
            (StatusCode::OK, Json(json!({ "event_staff": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, event_id = %event_id, "Failed to list staff assignments");
            map_staff_error(&e)
        }
    }
}

/// GET `/event-staff/{id}` - Get one assignment.
async fn get_assignment(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = StaffRepository::new((*state.db).clone());

    match repo.get_assignment(id).await {
        Ok(assignment) => (StatusCode::OK, Json(assignment_response(&assignment))).into_response(),
        Err(e) => {
            error!(error = %e, id = %id, "Failed to get staff assignment");
            map_staff_error(&e)
        }
    }
}

/// POST `/event-staff` - Assign a person to an event.
async fn create_assignment(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventStaffRequest>,
) -> impl IntoResponse {
    if payload.full_name.trim().is_empty() {
        return invalid_name_response();
    }

    let repo = StaffRepository::new((*state.db).clone());

    let input = CreateEventStaffInput {
        event_id: payload.event_id,
        full_name: payload.full_name,
        phone: payload.phone,
        department: payload.department,
        staff_type: payload.staff_type,
        assigned_task: payload.assigned_task,
        note: payload.note,
    };

    match repo.assign(input).await {
        Ok(assignment) => {
            info!(
                id = %assignment.id,
                event_id = %assignment.event_id,
                "Staff assignment created"
            );
            (StatusCode::CREATED, Json(assignment_response(&assignment))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create staff assignment");
            map_staff_error(&e)
        }
    }
}

/// POST `/event-staff/bulk` - Assign several people to one event atomically.
async fn create_assignments_bulk(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventStaffBulkRequest>,
) -> impl IntoResponse {
    if payload.staff.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "empty_list",
                "message": "At least one staff entry is required"
            })),
        )
            .into_response();
    }
    if payload.staff.iter().any(|s| s.full_name.trim().is_empty()) {
        return invalid_name_response();
    }

    let repo = StaffRepository::new((*state.db).clone());
    let event_id = payload.event_id;

    let inputs: Vec<CreateEventStaffInput> = payload
        .staff
        .into_iter()
        .map(|entry| CreateEventStaffInput {
            event_id,
            full_name: entry.full_name,
            phone: entry.phone,
            department: entry.department,
            staff_type: entry.staff_type,
            assigned_task: entry.assigned_task,
            note: entry.note,
        })
        .collect();

    match repo.assign_bulk(event_id, inputs).await {
        Ok(assignments) => {
            info!(
                event_id = %event_id,
                count = assignments.len(),
                "Staff assignments created in bulk"
            );
            let response: Vec<serde_json::Value> =
                assignments.iter().map(assignment_response).collect();
            (StatusCode::CREATED, Json(json!({ "event_staff": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, event_id = %event_id, "Failed to create staff assignments");
            map_staff_error(&e)
        }
    }
}

/// PUT `/event-staff/{id}` - Update an assignment.
async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventStaffRequest>,
) -> impl IntoResponse {
    if let Some(name) = &payload.full_name
        && name.trim().is_empty()
    {
        return invalid_name_response();
    }

    let repo = StaffRepository::new((*state.db).clone());

    let input = UpdateEventStaffInput {
        full_name: payload.full_name,
        phone: payload.phone,
        department: payload.department,
        staff_type: payload.staff_type,
        assigned_task: payload.assigned_task,
        note: payload.note,
    };

    match repo.update_assignment(id, input).await {
        Ok(assignment) => {
            info!(id = %assignment.id, "Staff assignment updated");
            (StatusCode::OK, Json(assignment_response(&assignment))).into_response()
        }
        Err(e) => {
            error!(error = %e, id = %id, "Failed to update staff assignment");
            map_staff_error(&e)
        }
    }
}

/// DELETE `/event-staff/{id}` - Remove an assignment.
async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = StaffRepository::new((*state.db).clone());

    match repo.delete_assignment(id).await {
        Ok(()) => {
            info!(id = %id, "Staff assignment deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, id = %id, "Failed to delete staff assignment");
            map_staff_error(&e)
        }
    }
}
