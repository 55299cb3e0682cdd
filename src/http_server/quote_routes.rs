//! Quote HTTP Routes
//!
//! JSON endpoints for listing, reading, creating, updating and deleting
//! quotes, plus random selection.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::quotes::{NewQuote, Quote, QuoteError, QuotePatch, QuoteResult, QuoteStore};

// ==================
// Shared State
// ==================

/// Quote state shared across handlers
pub struct QuoteState {
    pub store: Arc<QuoteStore>,
}

impl QuoteState {
    pub fn new(store: Arc<QuoteStore>) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

type ApiError = (StatusCode, Json<MessageResponse>);

const INVALID_JSON: &str = "invalid or missing JSON";
const NOT_FOUND: &str = "quote not found";
const INTERNAL: &str = "internal server error";

// ==================
// Quote Routes
// ==================

/// Create quote routes
pub fn quote_routes(state: Arc<QuoteState>) -> Router {
    Router::new()
        .route("/quotes", get(list_quotes_handler).post(create_quote_handler))
        .route("/quote", get(random_quote_handler))
        .route(
            "/quotes/:id",
            get(get_quote_handler)
                .put(update_quote_handler)
                .delete(delete_quote_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn message(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
}

fn not_found() -> ApiError {
    message(StatusCode::NOT_FOUND, NOT_FOUND)
}

/// Client errors carry their own message; server errors are logged and
/// hidden behind a generic one.
fn store_error(err: QuoteError, operation: &str, id: Option<u64>) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if !status.is_server_error() {
        return message(status, err.to_string());
    }
    error!(operation, ?id, error = %err, "Quote store failure");
    message(status, INTERNAL)
}

/// Run a store mutation on the blocking pool, since it rewrites the file.
async fn mutate<T, F>(
    state: &QuoteState,
    operation: &'static str,
    id: Option<u64>,
    f: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&QuoteStore) -> QuoteResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    match tokio::task::spawn_blocking(move || f(&store)).await {
        Ok(result) => result.map_err(|e| store_error(e, operation, id)),
        Err(e) => {
            error!(operation, ?id, error = %e, "Quote store task failed");
            Err(message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL))
        }
    }
}

/// A non-numeric id cannot name a quote, so it reads as not found.
fn quote_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    path.map(|Path(id)| id).map_err(|_| not_found())
}

// ==================
// Handlers
// ==================

async fn list_quotes_handler(State(state): State<Arc<QuoteState>>) -> Json<Vec<Quote>> {
    Json(state.store.list())
}

async fn random_quote_handler(
    State(state): State<Arc<QuoteState>>,
) -> Result<Json<Quote>, ApiError> {
    state
        .store
        .random()
        .map(Json)
        .ok_or_else(|| message(StatusCode::NOT_FOUND, "no quotes available"))
}

async fn get_quote_handler(
    State(state): State<Arc<QuoteState>>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Quote>, ApiError> {
    let id = quote_id(path)?;
    state.store.get(id).map(Json).ok_or_else(not_found)
}

async fn create_quote_handler(
    State(state): State<Arc<QuoteState>>,
    body: Result<Json<CreateQuoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Quote>), ApiError> {
    let Json(request) = body.map_err(|_| message(StatusCode::BAD_REQUEST, INVALID_JSON))?;

    let new = NewQuote::new(
        request.text.unwrap_or_default(),
        request.author.unwrap_or_default(),
    );
    let quote = mutate(&state, "create", None, move |store| store.create(new)).await?;

    Ok((StatusCode::CREATED, Json(quote)))
}

async fn update_quote_handler(
    State(state): State<Arc<QuoteState>>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<QuotePatch>, JsonRejection>,
) -> Result<Json<Quote>, ApiError> {
    let id = quote_id(path)?;
    let Json(patch) = body.map_err(|_| message(StatusCode::BAD_REQUEST, INVALID_JSON))?;

    mutate(&state, "update", Some(id), move |store| store.update(id, patch))
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

async fn delete_quote_handler(
    State(state): State<Arc<QuoteState>>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = quote_id(path)?;
    let deleted = mutate(&state, "delete", Some(id), move |store| store.delete(id)).await?;

    if !deleted {
        return Err(not_found());
    }
    Ok(Json(MessageResponse {
        message: "deleted".to_string(),
    }))
}
