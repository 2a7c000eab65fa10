//! Task template routes.

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
    entities::task_templates,
    repositories::task::{
        CreateTaskTemplateInput, TaskError, TaskRepository, UpdateTaskTemplateInput,
    },
};

/// Creates the task template routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/task-templates", get(list_templates))
        .route("/task-templates", post(create_template))
        .route("/task-templates/{template_id}", get(get_template))
        .route("/task-templates/{template_id}", put(update_template))
        .route("/task-templates/{template_id}", delete(delete_template))
}

/// Request body for creating a task template.
#[derive(Debug, Deserialize)]
pub struct CreateTaskTemplateRequest {
    /// Task name.
    pub task_name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for updating a task template.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskTemplateRequest {
    /// New name.
    pub task_name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Builds the JSON representation of a task template.
fn template_response(template: &task_templates::Model) -> serde_json::Value {
    json!({
        "id": template.id,
        "task_name": template.task_name,
        "description": template.description,
    })
}

/// Maps repository errors to HTTP responses.
fn map_task_error(e: &TaskError) -> axum::response::Response {
    match e {
        TaskError::TemplateNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
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

/// GET `/task-templates` - List all templates.
async fn list_templates(State(state): State<AppState>) -> impl IntoResponse {
    let repo = TaskRepository::new((*state.db).clone());

    match repo.list_templates().await {
        Ok(templates) => {
            let response: Vec<serde_json::Value> =
                templates.iter().map(template_response).collect();
            (StatusCode::OK, Json(json!({ "task_templates": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list task templates");
            map_task_error(&e)
        }
    }
}

/// GET `/task-templates/{template_id}` - Get one template.
async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TaskRepository::new((*state.db).clone());

    match repo.get_template(template_id).await {
        Ok(template) => (StatusCode::OK, Json(template_response(&template))).into_response(),
        Err(e) => {
            error!(error = %e, template_id = %template_id, "Failed to get task template");
            map_task_error(&e)
        }
    }
}

/// POST `/task-templates` - Create a template.
async fn create_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskTemplateRequest>,
) -> impl IntoResponse {
    if payload.task_name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Task name must not be empty"
            })),
        )
            .into_response();
    }

    let repo = TaskRepository::new((*state.db).clone());

    let input = CreateTaskTemplateInput {
        task_name: payload.task_name,
        description: payload.description,
    };

    match repo.create_template(input).await {
        Ok(template) => {
            info!(template_id = %template.id, name = %template.task_name, "Task template created");
            (StatusCode::CREATED, Json(template_response(&template))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create task template");
            map_task_error(&e)
        }
    }
}

/// PUT `/task-templates/{template_id}` - Update a template.
async fn update_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
    Json(payload): Json<UpdateTaskTemplateRequest>,
) -> impl IntoResponse {
    if let Some(name) = &payload.task_name
        && name.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Task name must not be empty"
            })),
        )
            .into_response();
    }

    let repo = TaskRepository::new((*state.db).clone());

    let input = UpdateTaskTemplateInput {
        task_name: payload.task_name,
        description: payload.description,
    };

    match repo.update_template(template_id, input).await {
        Ok(template) => {
            info!(template_id = %template.id, "Task template updated");
            (StatusCode::OK, Json(template_response(&template))).into_response()
        }
        Err(e) => {
            error!(error = %e, template_id = %template_id, "Failed to update task template");
            map_task_error(&e)
        }
    }
}

/// DELETE `/task-templates/{template_id}` - Delete a template.
async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TaskRepository::new((*state.db).clone());

    match repo.delete_template(template_id).await {
        Ok(()) => {
            info!(template_id = %template_id, "Task template deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, template_id = %template_id, "Failed to delete task template");
            map_task_error(&e)
        }
    }
}
