//! Staff directory routes.

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
    entities::staff,
    repositories::staff::{CreateStaffInput, StaffError, StaffRepository, UpdateStaffInput},
};

/// Creates the staff directory routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/staff", get(list_staff))
        .route("/staff", post(create_staff))
        .route("/staff/{staff_id}", get(get_staff))
        .route("/staff/{staff_id}", put(update_staff))
        .route("/staff/{staff_id}", delete(delete_staff))
}

/// Request body for creating a staff directory entry.
#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    /// Full name.
    pub full_name: String,
    /// Staff type (internal, vendor, volunteer, ...).
    pub staff_type: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Department.
    pub department: Option<String>,
}

/// Request body for updating a staff directory entry.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStaffRequest {
    /// New full name.
    pub full_name: Option<String>,
    /// New staff type.
    pub staff_type: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New department.
    pub department: Option<String>,
}

/// Builds the JSON representation of a staff member.
fn staff_response(member: &staff::Model) -> serde_json::Value {
    json!({
        "id": member.id,
        "full_name": member.full_name,
        "staff_type": member.staff_type,
        "phone": member.phone,
        "department": member.department,
    })
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

/// GET `/staff` - List the staff directory.
async fn list_staff(State(state): State<AppState>) -> impl IntoResponse {
    let repo = StaffRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(members) => {
            let response: Vec<serde_json::Value> = members.iter().map(staff_response).collect();
            (StatusCode::OK, Json(json!({ "staff": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list staff");
            map_staff_error(&e)
        }
    }
}

/// GET `/staff/{staff_id}` - Get one staff member.
async fn get_staff(State(state): State<AppState>, Path(staff_id): Path<Uuid>) -> impl IntoResponse {
    let repo = StaffRepository::new((*state.db).clone());

    match repo.get(staff_id).await {
        Ok(member) => (StatusCode::OK, Json(staff_response(&member))).into_response(),
        Err(e) => {
            error!(error = %e, staff_id = %staff_id, "Failed to get staff member");
            map_staff_error(&e)
        }
    }
}

/// POST `/staff` - Create a staff directory entry.
async fn create_staff(
    State(state): State<AppState>,
    Json(payload): Json<CreateStaffRequest>,
) -> impl IntoResponse {
    if payload.full_name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Full name must not be empty"
            })),
        )
            .into_response();
    }

    let repo = StaffRepository::new((*state.db).clone());

    let input = CreateStaffInput {
        full_name: payload.full_name,
        staff_type: payload.staff_type,
        phone: payload.phone,
        department: payload.department,
    };

    match repo.create(input).await {
        Ok(member) => {
            info!(staff_id = %member.id, name = %member.full_name, "Staff member created");
            (StatusCode::CREATED, Json(staff_response(&member))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create staff member");
            map_staff_error(&e)
        }
    }
}

/// PUT `/staff/{staff_id}` - Update a staff directory entry.
async fn update_staff(
    State(state): State<AppState>,
    Path(staff_id): Path<Uuid>,
    Json(payload): Json<UpdateStaffRequest>,
) -> impl IntoResponse {
    if let Some(name) = &payload.full_name
        && name.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Full name must not be empty"
            })),
        )
            .into_response();
    }

    let repo = StaffRepository::new((*state.db).clone());

    let input = UpdateStaffInput {
        full_name: payload.full_name,
        staff_type: payload.staff_type,
        phone: payload.phone,
        department: payload.department,
    };

    match repo.update(staff_id, input).await {
        Ok(member) => {
            info!(staff_id = %member.id, "Staff member updated");
            (StatusCode::OK, Json(staff_response(&member))).into_response()
        }
        Err(e) => {
            error!(error = %e, staff_id = %staff_id, "Failed to update staff member");
            map_staff_error(&e)
        }
    }
}

/// DELETE `/staff/{staff_id}` - Delete a staff directory entry.
async fn delete_staff(
    State(state): State<AppState>,
    Path(staff_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = StaffRepository::new((*state.db).clone());

    match repo.delete(staff_id).await {
        Ok(()) => {
            info!(staff_id = %staff_id, "Staff member deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, staff_id = %staff_id, "Failed to delete staff member");
            map_staff_error(&e)
        }
    }
}
