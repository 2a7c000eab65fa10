//! Per-event task routes.

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
    entities::{event_tasks, sea_orm_active_enums::TaskStatus},
    repositories::task::{CreateEventTaskInput, TaskError, TaskRepository, UpdateEventTaskInput},
};

/// Creates the event task routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/event-tasks", post(create_task))
        .route("/event-tasks/{task_id}", get(get_task))
        .route("/event-tasks/{task_id}", put(update_task))
        .route("/event-tasks/{task_id}", delete(delete_task))
        .route("/event-tasks/event/{event_id}", get(list_tasks_by_event))
        .route("/event-tasks/staff/{staff_id}", get(list_tasks_by_staff))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating an event task.
#[derive(Debug, Deserialize)]
pub struct CreateEventTaskRequest {
    /// Owning event.
    pub event_id: Uuid,
    /// Template this task instantiates, if any.
    pub task_id: Option<Uuid>,
    /// Assigned staff member, if any.
    pub staff_id: Option<Uuid>,
    /// Free-form note.
    pub note: Option<String>,
}

/// Request body for updating an event task.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventTaskRequest {
    /// New assigned staff member.
    pub staff_id: Option<Uuid>,
    /// New status: pending, in_progress, done.
    pub status: Option<String>,
    /// New note.
    pub note: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Converts a task status string to the enum value.
fn parse_task_status(s: &str) -> Option<TaskStatus> {
    match s {
        "pending" => Some(TaskStatus::Pending),
        "in_progress" => Some(TaskStatus::InProgress),
        "done" => Some(TaskStatus::Done),
        _ => None,
    }
}

/// Converts a task status enum to its wire string.
fn task_status_to_string(status: &TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Done => "done",
    }
}

/// Builds the JSON representation of an event task.
fn task_response(task: &event_tasks::Model) -> serde_json::Value {
    json!({
        "id": task.id,
        "event_id": task.event_id,
        "task_id": task.task_id,
        "staff_id": task.staff_id,
        "status": task_status_to_string(&task.status),
        "note": task.note,
    })
}

fn invalid_status_response() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_status",
            "message": "Invalid status. Must be one of: pending, in_progress, done"
        })),
    )
        .into_response()
}

/// Maps repository errors to HTTP responses.
fn map_task_error(e: &TaskError) -> axum::response::Response {
    match e {
        TaskError::TemplateNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "template_not_found",
                "message": format!("Task template not found: {id}")
            })),
        )
            .into_response(),
        TaskError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Event task not found: {id}")
            })),
        )
            .into_response(),
        TaskError::EventNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "event_not_found",
                "message": format!("Event not found: {id}")
            })),
        )
            .into_response(),
        TaskError::StaffNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "staff_not_found",
                "message": format!("Staff not found: {id}")
            })),
        )
            .into_response(),
        TaskError::Database(_) => (
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

/// GET `/event-tasks/event/{event_id}` - List the tasks of one event.
async fn list_tasks_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TaskRepository::new((*state.db).clone());

    match repo.list_tasks_by_event(event_id).await {
        Ok(tasks) => {
            let response: Vec<serde_json::Value> = tasks.iter().map(task_response).collect();
            (StatusCode::OK, Json(json!({ "event_tasks": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, event_id = %event_id, "Failed to list event tasks");
            map_task_error(&e)
        }
    }
}

/// GET `/event-tasks/staff/{staff_id}` - List the tasks assigned to one person.
async fn list_tasks_by_staff(
    State(state): State<AppState>,
    Path(staff_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TaskRepository::new((*state.db).clone());

    match repo.list_tasks_by_staff(staff_id).await {
        Ok(tasks) => {
            let response: Vec<serde_json::Value> = tasks.iter().map(task_response).collect();
            (StatusCode::OK, Json(json!({ "event_tasks": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, staff_id = %staff_id, "Failed to list staff tasks");
            map_task_error(&e)
        }
    }
}

/// GET `/event-tasks/{task_id}` - Get one event task.
async fn get_task(State(state): State<AppState>, Path(task_id): Path<Uuid>) -> impl IntoResponse {
    let repo = TaskRepository::new((*state.db).clone());

    match repo.get_task(task_id).await {
        Ok(task) => (StatusCode::OK, Json(task_response(&task))).into_response(),
        Err(e) => {
            error!(error = %e, task_id = %task_id, "Failed to get event task");
            map_task_error(&e)
        }
    }
}

/// POST `/event-tasks` - Create an event task. New tasks start pending.
async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventTaskRequest>,
) -> impl IntoResponse {
    let repo = TaskRepository::new((*state.db).clone());

    let input = CreateEventTaskInput {
        event_id: payload.event_id,
        task_id: payload.task_id,
        staff_id: payload.staff_id,
        note: payload.note,
    };

    match repo.create_task(input).await {
        Ok(task) => {
            info!(task_id = %task.id, event_id = %task.event_id, "Event task created");
            (StatusCode::CREATED, Json(task_response(&task))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create event task");
            map_task_error(&e)
        }
    }
}

/// PUT `/event-tasks/{task_id}` - Update status, assignee, or note.
async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<UpdateEventTaskRequest>,
) -> impl IntoResponse {
    let status = match payload.status.as_deref() {
        None => None,
        Some(s) => match parse_task_status(s) {
            Some(status) => Some(status),
            None => return invalid_status_response(),
        },
    };

    let repo = TaskRepository::new((*state.db).clone());

    let input = UpdateEventTaskInput {
        staff_id: payload.staff_id,
        status,
        note: payload.note,
    };

    match repo.update_task(task_id, input).await {
        Ok(task) => {
            info!(task_id = %task.id, "Event task updated");
            (StatusCode::OK, Json(task_response(&task))).into_response()
        }
        Err(e) => {
            error!(error = %e, task_id = %task_id, "Failed to update event task");
            map_task_error(&e)
        }
    }
}

/// DELETE `/event-tasks/{task_id}` - Delete an event task.
async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TaskRepository::new((*state.db).clone());

    match repo.delete_task(task_id).await {
        Ok(()) => {
            info!(task_id = %task_id, "Event task deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, task_id = %task_id, "Failed to delete event task");
            map_task_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_round_trip() {
        for status in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(
                parse_task_status(task_status_to_string(&status)),
                Some(status)
            );
        }
        assert_eq!(parse_task_status("finished"), None);
    }
}
