//! Event finance routes.
//!
//! Amount fields travel as strings on the wire to keep exact decimal
//! values; all aggregation happens in `eventra-core`.

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
use eventra_core::finance::{FALLBACK_SERVICE_LABEL, FinanceSummary};
use eventra_db::repositories::finance::{
    CreateFinanceLineInput, FinanceError, FinanceLineWithService, FinanceRepository,
    UpdateFinanceLineInput,
};

/// Creates the finance routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/finances", get(list_finances))
        .route("/finances", post(create_finance))
        .route("/finances/{line_id}", get(get_finance))
        .route("/finances/{line_id}", put(update_finance))
        .route("/finances/{line_id}", delete(delete_finance))
        .route("/finances/event/{event_id}", get(list_event_finances))
        .route("/finances/summary/{event_id}", get(get_event_summary))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a finance line.
#[derive(Debug, Deserialize)]
pub struct CreateFinanceRequest {
    /// Owning event.
    pub event_id: Uuid,
    /// Linked catalog service, if any.
    pub service_id: Option<Uuid>,
    /// Free-text service name.
    pub service_name: Option<String>,
    /// Planned amount.
    pub estimated_amount: Decimal,
    /// Note on the planned amount.
    pub estimated_note: Option<String>,
    /// Overrun amount.
    #[serde(default)]
    pub extra_amount: Decimal,
    /// Note on the overrun.
    pub extra_note: Option<String>,
}

/// Request body for updating a finance line. The clients send the full
/// record, so every field is replaced.
#[derive(Debug, Deserialize)]
pub struct UpdateFinanceRequest {
    /// Linked catalog service; `null` clears the link.
    pub service_id: Option<Uuid>,
    /// Free-text service name; `null` clears it.
    pub service_name: Option<String>,
    /// Planned amount.
    pub estimated_amount: Decimal,
    /// Note on the planned amount.
    pub estimated_note: Option<String>,
    /// Overrun amount.
    #[serde(default)]
    pub extra_amount: Decimal,
    /// Note on the overrun.
    pub extra_note: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Rejects negative amounts at the API boundary.
fn check_amounts(estimated: Decimal, extra: Decimal) -> Result<(), axum::response::Response> {
    if estimated.is_sign_negative() || extra.is_sign_negative() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Amounts must not be negative"
            })),
        )
            .into_response());
    }
    Ok(())
}

/// Builds the JSON representation of a finance line, its display name
/// resolved from the linked catalog service when present.
fn finance_response(row: &FinanceLineWithService) -> serde_json::Value {
    let display_name = row
        .service
        .as_ref()
        .map(|s| s.service_name.clone())
        .or_else(|| row.line.service_name.clone())
        .unwrap_or_else(|| FALLBACK_SERVICE_LABEL.to_string());

    json!({
        "id": row.line.id,
        "event_id": row.line.event_id,
        "service_id": row.line.service_id,
        "service_name": display_name,
        "estimated_amount": row.line.estimated_amount.to_string(),
        "estimated_note": row.line.estimated_note,
        "extra_amount": row.line.extra_amount.to_string(),
        "extra_note": row.line.extra_note,
        "total_amount": (row.line.estimated_amount + row.line.extra_amount).to_string(),
    })
}

/// Builds the JSON representation of a finance summary.
fn summary_response(summary: &FinanceSummary) -> serde_json::Value {
    let items: Vec<serde_json::Value> = summary
        .items
        .iter()
        .map(|item| {
            json!({
                "id": item.id,
                "service_name": item.service_name,
                "estimated_amount": item.estimated_amount.to_string(),
                "estimated_note": item.estimated_note,
                "extra_amount": item.extra_amount.to_string(),
                "extra_note": item.extra_note,
                "total": item.total.to_string(),
            })
        })
        .collect();

    json!({
        "event_id": summary.event_id,
        "estimated_total": summary.estimated_total.to_string(),
        "extra_total": summary.extra_total.to_string(),
        "grand_total": summary.grand_total.to_string(),
        "item_count": summary.item_count,
        "items": items,
    })
}

/// Maps repository errors to HTTP responses.
fn map_finance_error(e: &FinanceError) -> axum::response::Response {
    match e {
        FinanceError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Finance line not found: {id}")
            })),
        )
            .into_response(),
        FinanceError::EventNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "event_not_found",
                "message": format!("Event not found: {id}")
            })),
        )
            .into_response(),
        FinanceError::ServiceNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "service_not_found",
                "message": format!("Service not found: {id}")
            })),
        )
            .into_response(),
        FinanceError::Database(_) => (
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

/// GET `/finances` - List all finance lines.
async fn list_finances(State(state): State<AppState>) -> impl IntoResponse {
    let repo = FinanceRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(rows) => {
            let response: Vec<serde_json::Value> = rows.iter().map(finance_response).collect();
            (StatusCode::OK, Json(json!({ "finances": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list finance lines");
            map_finance_error(&e)
        }
    }
}

/// GET `/finances/{line_id}` - Get one finance line.
async fn get_finance(State(state): State<AppState>, Path(line_id): Path<Uuid>) -> impl IntoResponse {
    let repo = FinanceRepository::new((*state.db).clone());

    match repo.get(line_id).await {
        Ok(row) => (StatusCode::OK, Json(finance_response(&row))).into_response(),
        Err(e) => {
            error!(error = %e, line_id = %line_id, "Failed to get finance line");
            map_finance_error(&e)
        }
    }
}

/// GET `/finances/event/{event_id}` - List the finance lines of one event.
async fn list_event_finances(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = FinanceRepository::new((*state.db).clone());

    match repo.list_by_event(event_id).await {
        Ok(rows) => {
            let response: Vec<serde_json::Value> = rows.iter().map(finance_response).collect();
            (StatusCode::OK, Json(json!({ "finances": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, event_id = %event_id, "Failed to list event finance lines");
            map_finance_error(&e)
        }
    }
}

/// GET `/finances/summary/{event_id}` - Aggregate finance summary for one event.
///
/// Every field is always present; an event with no lines gets zeros.
async fn get_event_summary(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = FinanceRepository::new((*state.db).clone());

    match repo.summary(event_id).await {
        Ok(summary) => (StatusCode::OK, Json(summary_response(&summary))).into_response(),
        Err(e) => {
            error!(error = %e, event_id = %event_id, "Failed to compute finance summary");
            map_finance_error(&e)
        }
    }
}

/// POST `/finances` - Create a finance line.
async fn create_finance(
    State(state): State<AppState>,
    Json(payload): Json<CreateFinanceRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_amounts(payload.estimated_amount, payload.extra_amount) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());

    let input = CreateFinanceLineInput {
        event_id: payload.event_id,
        service_id: payload.service_id,
        service_name: payload.service_name,
        estimated_amount: payload.estimated_amount,
        estimated_note: payload.estimated_note,
        extra_amount: payload.extra_amount,
        extra_note: payload.extra_note,
    };

    match repo.create(input).await {
        Ok(line) => {
            info!(line_id = %line.id, event_id = %line.event_id, "Finance line created");
            match repo.get(line.id).await {
                Ok(row) => (StatusCode::CREATED, Json(finance_response(&row))).into_response(),
                Err(e) => map_finance_error(&e),
            }
        }
        Err(e) => {
            error!(error = %e, "Failed to create finance line");
            map_finance_error(&e)
        }
    }
}

/// PUT `/finances/{line_id}` - Replace a finance line.
async fn update_finance(
    State(state): State<AppState>,
    Path(line_id): Path<Uuid>,
    Json(payload): Json<UpdateFinanceRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_amounts(payload.estimated_amount, payload.extra_amount) {
        return response;
    }

    let repo = FinanceRepository::new((*state.db).clone());

    let input = UpdateFinanceLineInput {
        service_id: payload.service_id,
        service_name: payload.service_name,
        estimated_amount: payload.estimated_amount,
        estimated_note: payload.estimated_note,
        extra_amount: payload.extra_amount,
        extra_note: payload.extra_note,
    };

    match repo.update(line_id, input).await {
        Ok(line) => {
            info!(line_id = %line.id, "Finance line updated");
            match repo.get(line.id).await {
                Ok(row) => (StatusCode::OK, Json(finance_response(&row))).into_response(),
                Err(e) => map_finance_error(&e),
            }
        }
        Err(e) => {
            error!(error = %e, line_id = %line_id, "Failed to update finance line");
            map_finance_error(&e)
        }
    }
}

/// DELETE `/finances/{line_id}` - Delete a finance line.
async fn delete_finance(
    State(state): State<AppState>,
    Path(line_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = FinanceRepository::new((*state.db).clone());

    match repo.delete(line_id).await {
        Ok(()) => {
            info!(line_id = %line_id, "Finance line deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, line_id = %line_id, "Failed to delete finance line");
            map_finance_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_amounts_rejected() {
        assert!(check_amounts(dec!(-1), dec!(0)).is_err());
        assert!(check_amounts(dec!(0), dec!(-0.01)).is_err());
        assert!(check_amounts(dec!(0), dec!(0)).is_ok());
        assert!(check_amounts(dec!(1000000), dec!(200000)).is_ok());
    }

    #[test]
    fn test_extra_amount_defaults_to_zero() {
        let req: CreateFinanceRequest = serde_json::from_str(
            r#"{"event_id": "0190c3a1-0000-7000-8000-000000000001", "estimated_amount": "500000"}"#,
        )
        .unwrap();
        assert_eq!(req.extra_amount, Decimal::ZERO);
    }
}
