//! Service catalog routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use eventra_db::{
    entities::services,
    repositories::catalog::{
        CatalogError, CatalogRepository, CreateServiceInput, UpdateServiceInput,
    },
};

/// Creates the service catalog routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/services", post(create_service))
        .route("/services/{service_id}", get(get_service))
        .route("/services/{service_id}", put(update_service))
        .route("/services/{service_id}", delete(delete_service))
}

/// Request body for creating a catalog service.
#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    /// Display name of the service offering.
    pub service_name: String,
    /// Base price used to prefill finance estimates.
    #[serde(default)]
    pub base_price: Decimal,
}

/// Request body for updating a catalog service.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateServiceRequest {
    /// New name.
    pub service_name: Option<String>,
    /// New base price.
    pub base_price: Option<Decimal>,
}

/// Builds the JSON representation of a catalog service.
fn service_response(service: &services::Model) -> serde_json::Value {
    json!({
        "id": service.id,
        "service_name": service.service_name,
        "base_price": service.base_price.to_string(),
    })
}

/// Maps repository errors to HTTP responses.
fn map_catalog_error(e: &CatalogError) -> axum::response::Response {
    match e {
        CatalogError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Service not found: {id}")
            })),
        )
            .into_response(),
        CatalogError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}

/// GET `/services` - List the catalog, ordered by name.
async fn list_services(State(state): State<AppState>) -> impl IntoResponse {
    let repo = CatalogRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(services) => {
            let response: Vec<serde_json::Value> = services.iter().map(service_response).collect();
            (StatusCode::OK, Json(json!({ "services": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list services");
            map_catalog_error(&e)
        }
    }
}

/// GET `/services/{service_id}` - Get one catalog service.
async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CatalogRepository::new((*state.db).clone());

    match repo.get(service_id).await {
        Ok(service) => (StatusCode::OK, Json(service_response(&service))).into_response(),
        Err(e) => {
            error!(error = %e, service_id = %service_id, "Failed to get service");
            map_catalog_error(&e)
        }
    }
}

/// POST `/services` - Create a catalog service.
async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateServiceRequest>,
) -> impl IntoResponse {
    if payload.service_name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Service name must not be empty"
            })),
        )
            .into_response();
    }
    if payload.base_price.is_sign_negative() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Base price must not be negative"
            })),
        )
            .into_response();
    }

    let repo = CatalogRepository::new((*state.db).clone());

    let input = CreateServiceInput {
        service_name: payload.service_name,
        base_price: payload.base_price,
    };

    match repo.create(input).await {
        Ok(service) => {
            info!(service_id = %service.id, name = %service.service_name, "Service created");
            (StatusCode::CREATED, Json(service_response(&service))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create service");
            map_catalog_error(&e)
        }
    }
}

/// PUT `/services/{service_id}` - Update a catalog service.
async fn update_service(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
    Json(payload): Json<UpdateServiceRequest>,
) -> impl IntoResponse {
    if let Some(name) = &payload.service_name
        && name.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Service name must not be empty"
            })),
        )
            .into_response();
    }
    if let Some(price) = payload.base_price
        && price.is_sign_negative()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Base price must not be negative"
            })),
        )
            .into_response();
    }

    let repo = CatalogRepository::new((*state.db).clone());

    let input = UpdateServiceInput {
        service_name: payload.service_name,
        base_price: payload.base_price,
    };

    match repo.update(service_id, input).await {
        Ok(service) => {
            info!(service_id = %service.id, "Service updated");
            (StatusCode::OK, Json(service_response(&service))).into_response()
        }
        Err(e) => {
            error!(error = %e, service_id = %service_id, "Failed to update service");
            map_catalog_error(&e)
        }
    }
}

/// DELETE `/services/{service_id}` - Delete a catalog service.
///
/// Finance lines linking to it keep their amounts; the link is set to
/// null by the database.
async fn delete_service(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CatalogRepository::new((*state.db).clone());

    match repo.delete(service_id).await {
        Ok(()) => {
            info!(service_id = %service_id, "Service deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, service_id = %service_id, "Failed to delete service");
            map_catalog_error(&e)
        }
    }
}
