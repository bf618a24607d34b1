//! Statistics endpoints

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;

use crate::error::{ApiJson, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::{stats, word_lists};
use crate::AppState;

/// POST /api/stats/session
pub async fn record_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<GameSession>)> {
    let session = stats::record_session(state.store.as_ref(), auth.user_id, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/stats/user
pub async fn user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<UserStatsResponse>> {
    let stats = stats::user_stats(state.store.as_ref(), auth.user_id).await?;
    Ok(Json(stats))
}

/// GET /api/stats/review
pub async fn review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<DueWord>>> {
    let lists = state.store.list_word_lists(auth.user_id).await?;
    Ok(Json(word_lists::due_words(&lists, Utc::now())))
}
