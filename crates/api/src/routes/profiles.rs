//! Account profile routes.
//!
//! Profiles mirror accounts at the external identity provider; role
//! changes and deletions require an admin role.

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

use crate::{AppState, middleware::AuthUser};
use eventra_db::{
    entities::{profiles, sea_orm_active_enums::UserRole},
    repositories::profile::{
        CreateProfileInput, ProfileError, ProfileRepository, UpdateProfileInput,
    },
};
use eventra_shared::Role;

/// Creates the profile routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(list_profiles))
        .route("/profiles", post(create_profile))
        .route("/profiles/{profile_id}", get(get_profile))
        .route("/profiles/{profile_id}", put(update_profile))
        .route("/profiles/{profile_id}", delete(delete_profile))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for registering a profile.
#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    /// Identity provider subject ID.
    pub id: Uuid,
    /// Account email.
    pub email: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
    /// Account role: super_admin, admin, staff.
    pub role: Option<String>,
}

/// Request body for updating a profile.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    /// New email.
    pub email: Option<String>,
    /// New display name.
    pub full_name: Option<String>,
    /// New role: super_admin, admin, staff.
    pub role: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Requires an account-management role.
fn check_admin(auth: &AuthUser) -> Result<(), axum::response::Response> {
    if auth.role().can_manage_accounts() {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Admin role required"
            })),
        )
            .into_response())
    }
}

/// Parses a role string, mapping unknown values to a 400 response.
fn parse_role(s: &str) -> Result<UserRole, axum::response::Response> {
    s.parse::<Role>().map(UserRole::from).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_role",
                "message": "Invalid role. Must be one of: super_admin, admin, staff"
            })),
        )
            .into_response()
    })
}

/// Builds the JSON representation of a profile.
fn profile_response(profile: &profiles::Model) -> serde_json::Value {
    json!({
        "id": profile.id,
        "email": profile.email,
        "full_name": profile.full_name,
        "role": Role::from(profile.role.clone()).to_string(),
        "created_at": profile.created_at.to_rfc3339(),
    })
}

/// Maps repository errors to HTTP responses.
fn map_profile_error(e: &ProfileError) -> axum::response::Response {
    match e {
        ProfileError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Profile not found: {id}")
            })),
        )
            .into_response(),
        ProfileError::AlreadyExists(id) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "already_exists",
                "message": format!("Profile already exists: {id}")
            })),
        )
            .into_response(),
        ProfileError::Database(_) => (
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

/// GET `/profiles` - List all profiles.
async fn list_profiles(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = ProfileRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(profiles) => {
            let response: Vec<serde_json::Value> = profiles.iter().map(profile_response).collect();
            (StatusCode::OK, Json(json!({ "profiles": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list profiles");
            map_profile_error(&e)
        }
    }
}

/// GET `/profiles/{profile_id}` - Get one profile.
async fn get_profile(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(profile_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ProfileRepository::new((*state.db).clone());

    match repo.get(profile_id).await {
        Ok(profile) => (StatusCode::OK, Json(profile_response(&profile))).into_response(),
        Err(e) => {
            error!(error = %e, profile_id = %profile_id, "Failed to get profile");
            map_profile_error(&e)
        }
    }
}

/// POST `/profiles` - Register a profile for an identity provider account.
async fn create_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateProfileRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_admin(&auth) {
        return response;
    }

    let role = match payload.role.as_deref() {
        // New accounts default to regular staff.
        None => UserRole::Staff,
        Some(s) => match parse_role(s) {
            Ok(role) => role,
            Err(response) => return response,
        },
    };

    let repo = ProfileRepository::new((*state.db).clone());

    let input = CreateProfileInput {
        id: payload.id,
        email: payload.email,
        full_name: payload.full_name,
        role,
    };

    match repo.create(input).await {
        Ok(profile) => {
            info!(profile_id = %profile.id, "Profile created");
            (StatusCode::CREATED, Json(profile_response(&profile))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create profile");
            map_profile_error(&e)
        }
    }
}

/// PUT `/profiles/{profile_id}` - Update a profile, including its role.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(profile_id): Path<Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_admin(&auth) {
        return response;
    }

    let role = match payload.role.as_deref() {
        None => None,
        Some(s) => match parse_role(s) {
            Ok(role) => Some(role),
            Err(response) => return response,
        },
    };

    let repo = ProfileRepository::new((*state.db).clone());

    let input = UpdateProfileInput {
        email: payload.email,
        full_name: payload.full_name,
        role,
    };

    match repo.update(profile_id, input).await {
        Ok(profile) => {
            info!(profile_id = %profile.id, "Profile updated");
            (StatusCode::OK, Json(profile_response(&profile))).into_response()
        }
        Err(e) => {
            error!(error = %e, profile_id = %profile_id, "Failed to update profile");
            map_profile_error(&e)
        }
    }
}

/// DELETE `/profiles/{profile_id}` - Delete a profile.
async fn delete_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(profile_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_admin(&auth) {
        return response;
    }

    match ProfileRepository::new((*state.db).clone())
        .delete(profile_id)
        .await
    {
        Ok(()) => {
            info!(profile_id = %profile_id, "Profile deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, profile_id = %profile_id, "Failed to delete profile");
            map_profile_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert!(matches!(parse_role("admin"), Ok(UserRole::Admin)));
        assert!(matches!(parse_role("super_admin"), Ok(UserRole::SuperAdmin)));
        assert!(parse_role("owner").is_err());
    }
}
