//! Posting pipeline routes.
//!
//! One endpoint posts a teller request as an atomic balanced batch; one
//! reverses a posted transaction; one resolves a request id after a
//! `DuplicateRequest` conflict.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, warn};
use uuid::Uuid;

use crate::{AppState, middleware::AuthTeller};
use tellerpoint_core::request::PostingRequest;
use tellerpoint_db::{PostedBatch, PostingError, PostingRepository};
use tellerpoint_shared::AppError;

/// Creates the posting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/postings", post(create_posting))
        .route("/postings/{request_id}", get(get_posting))
        .route(
            "/teller-transactions/{teller_transaction_id}/reverse",
            post(reverse_posting),
        )
}

/// Builds the posting repository from shared state.
fn posting_repository(state: &AppState) -> PostingRepository {
    PostingRepository::new(
        (*state.db).clone(),
        (*state.approval_tokens).clone(),
        state.approval_policy,
    )
}

/// The `{ ok: true, … }` success body for a committed posting.
fn posted_body(posted: &PostedBatch) -> serde_json::Value {
    json!({
        "ok": true,
        "posting_batch_id": posted.posting_batch.id,
        "teller_transaction_id": posted.teller_transaction.id,
        "request_id": posted.teller_transaction.request_id,
    })
}

/// Maps a posting error to its `{ ok: false, error }` response.
fn error_response(err: PostingError) -> axum::response::Response {
    let err: AppError = err.into();
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, code = err.error_code(), "posting pipeline failed");
    } else {
        warn!(error = %err, code = err.error_code(), "posting rejected");
    }
    (status, Json(json!({ "ok": false, "error": err.to_string() }))).into_response()
}

/// POST `/postings` - run the posting pipeline end-to-end.
async fn create_posting(
    State(state): State<AppState>,
    teller: AuthTeller,
    Json(request): Json<PostingRequest>,
) -> impl IntoResponse {
    let repo = posting_repository(&state);

    match repo.post(request, teller.context()).await {
        Ok(posted) => (StatusCode::OK, Json(posted_body(&posted))).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST `/teller-transactions/{teller_transaction_id}/reverse` - post the
/// mirror batch.
async fn reverse_posting(
    State(state): State<AppState>,
    teller: AuthTeller,
    Path(teller_transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = posting_repository(&state);

    match repo.reverse(teller_transaction_id, teller.context()).await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "posting_batch_id": result.reversal.posting_batch.id,
                "teller_transaction_id": result.reversal.teller_transaction.id,
                "request_id": result.reversal.teller_transaction.request_id,
                "reversal_of_teller_transaction_id": result.original_transaction.id,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET `/postings/{request_id}` - the resolve path after a duplicate-request
/// conflict.
async fn get_posting(
    State(state): State<AppState>,
    _teller: AuthTeller,
    Path(request_id): Path<String>,
) -> impl IntoResponse {
    let repo = posting_repository(&state);

    match repo.find_by_request_id(&request_id).await {
        Ok(Some(posted)) => (StatusCode::OK, Json(posted_body(&posted))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "ok": false, "error": format!("no posting for request {request_id}") })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
