//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod event_staff;
pub mod event_tasks;
pub mod events;
pub mod finances;
pub mod health;
pub mod profiles;
pub mod services;
pub mod staff;
pub mod task_templates;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(events::routes())
        .merge(finances::routes())
        .merge(services::routes())
        .merge(staff::routes())
        .merge(event_staff::routes())
        .merge(task_templates::routes())
        .merge(event_tasks::routes())
        .merge(profiles::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new().merge(health::routes()).merge(protected_routes)
}
