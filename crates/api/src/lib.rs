//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the posting pipeline
//! - Teller-session authentication middleware
//! - JSON result shapes (`{ ok: true, … }` / `{ ok: false, error }`)

pub mod middleware;
pub mod routes;

use axum::Router;
use jsonwebtoken::DecodingKey;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tellerpoint_core::approval::ApprovalPolicy;
use tellerpoint_shared::ApprovalTokenService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Approval token service for supervisor token verification.
    pub approval_tokens: Arc<ApprovalTokenService>,
    /// Amount threshold policy for supervisor approval.
    pub approval_policy: ApprovalPolicy,
    /// Key verifying teller session tokens issued by the auth collaborator.
    pub session_key: Arc<DecodingKey>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
