//! Route definitions
//!
//! Public and moderation routes mounted under /api/v1.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{admin, health, murals};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(public_routes()).merge(admin_routes())
}

/// Anonymous map and submission routes
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/murals", get(murals::list_murals).post(murals::submit_mural))
        .route("/murals/:mural_id", get(murals::get_mural))
        .route(
            "/murals/:mural_id/modification-requests",
            post(murals::submit_modification_request),
        )
}

/// Moderator routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/murals", get(admin::list_murals))
        .route("/admin/stats", get(admin::stats))
        .route("/admin/murals/:mural_id", patch(admin::decide_mural))
        .route("/admin/murals/:mural_id/state", put(admin::override_mural_state))
        .route(
            "/admin/murals/:mural_id/modification-requests/:request_id",
            patch(admin::decide_modification_request),
        )
        .route("/admin/audit", get(admin::list_audit))
}
