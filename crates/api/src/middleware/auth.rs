//! Teller-session authentication middleware.
//!
//! Sessions are issued by the authentication collaborator; this middleware
//! only verifies the bearer token and materializes the explicit
//! `TellerContext` the posting engine requires. Authorization (which
//! transaction types a user may submit) is enforced upstream.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{Validation, decode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use tellerpoint_shared::TellerContext;

/// Claims carried by a teller session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (teller user ID).
    pub sub: Uuid,
    /// Branch code.
    pub brn: String,
    /// Workstation code.
    pub wst: String,
    /// Teller session ID.
    pub sid: Uuid,
    /// The teller's own drawer reference.
    pub drw: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl SessionClaims {
    /// Builds the explicit teller context from the claims.
    #[must_use]
    pub fn to_context(&self) -> TellerContext {
        TellerContext::new(self.sub, &self.brn, &self.wst, self.sid, &self.drw)
    }
}

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Authentication middleware that validates teller session tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Verifies the token against the session key
/// 3. Stores the teller context in request extensions for handlers
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "ok": false,
                "error": "Authorization header with Bearer token is required"
            })),
        )
            .into_response();
    };

    match decode::<SessionClaims>(token, &state.session_key, &Validation::default()) {
        Ok(data) => {
            request.extensions_mut().insert(data.claims.to_context());
            next.run(request).await
        }
        Err(e) => {
            let message = match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Session has expired",
                _ => "Invalid or malformed session token",
            };
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "ok": false, "error": message })),
            )
                .into_response()
        }
    }
}

/// Extractor for the authenticated teller's context.
///
/// Use this in handlers to get the acting teller:
///
/// ```ignore
/// async fn handler(teller: AuthTeller) -> impl IntoResponse {
///     let ctx = teller.context();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthTeller(pub TellerContext);

impl AuthTeller {
    /// Returns the teller context.
    #[must_use]
    pub const fn context(&self) -> &TellerContext {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthTeller
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TellerContext>()
            .cloned()
            .map(AuthTeller)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "ok": false,
                        "error": "Authentication required"
                    })),
                )
            })
    }
}
