//! HTTP surface for the leaderboard.
//!
//! JSON over REST, consumed by the presentation layer:
//! - `GET /scores` — top scores, highest first.
//! - `POST /scores` — submit a finished game; 400 on bad input, 201 with
//!   the created record on success.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::store::{NewScore, ScoreStore, StoreError};

/// Maximum number of records returned by `GET /scores`.
pub const TOP_SCORES: usize = 50;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// The leaderboard backend, injected at construction.
    pub store: Arc<dyn ScoreStore>,
}

/// Builds the REST router over the given store.
pub fn router(store: Arc<dyn ScoreStore>) -> Router {
    Router::new()
        .route("/scores", get(list_scores).post(create_score))
        .with_state(AppState { store })
}

/// Inserts the three demonstration records when the store is empty.
///
/// Cosmetic only: gives a fresh install a populated leaderboard covering
/// each tier.
///
/// # Errors
///
/// Returns [`StoreError`] if the store cannot be read or written.
#[instrument(skip(store))]
pub fn seed_demo_scores(store: &dyn ScoreStore) -> Result<(), StoreError> {
    if !store.list_top(1)?.is_empty() {
        return Ok(());
    }

    info!("Seeding demonstration scores");
    store.create(NewScore::new(
        "MoneyMaster".to_string(),
        450,
        "adults".to_string(),
        250,
        0,
        0,
        0,
        0,
    ))?;
    store.create(NewScore::new(
        "SaverKid".to_string(),
        320,
        "kids".to_string(),
        180,
        0,
        0,
        0,
        0,
    ))?;
    store.create(NewScore::new(
        "TeenTycoon".to_string(),
        380,
        "teens".to_string(),
        210,
        0,
        0,
        0,
        0,
    ))?;
    Ok(())
}

#[instrument(skip(state))]
async fn list_scores(State(state): State<AppState>) -> Response {
    match state.store.list_top(TOP_SCORES) {
        Ok(scores) => {
            info!(count = scores.len(), "Scores listed");
            (StatusCode::OK, Json(scores)).into_response()
        }
        Err(err) => {
            error!(error = %err, "Failed to list scores");
            internal_error()
        }
    }
}

#[instrument(skip(state, payload))]
async fn create_score(
    State(state): State<AppState>,
    payload: Result<Json<NewScore>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!(error = %rejection, "Malformed score submission");
            return invalid_input();
        }
    };

    if let Err(err) = input.validate() {
        warn!(error = %err, "Score submission failed validation");
        return invalid_input();
    }

    match state.store.create(input) {
        Ok(record) => {
            info!(id = record.id(), score = record.score(), "Score created");
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(err) => {
            error!(error = %err, "Failed to persist score");
            internal_error()
        }
    }
}

fn invalid_input() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "Invalid input" })),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal server error" })),
    )
        .into_response()
}
