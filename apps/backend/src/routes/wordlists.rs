//! Word list endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, ApiJson, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::{progress, word_lists};
use crate::AppState;

pub const PUBLIC_LIST_LIMIT: usize = 20;

/// GET /api/wordlists
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<WordList>>> {
    let lists = state.store.list_word_lists(auth.user_id).await?;
    Ok(Json(lists))
}

/// GET /api/wordlists/public
pub async fn list_public(State(state): State<AppState>) -> Result<Json<Vec<PublicWordList>>> {
    let lists = state.store.list_public_word_lists(PUBLIC_LIST_LIMIT).await?;
    Ok(Json(lists))
}

/// POST /api/wordlists
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<CreateWordListRequest>,
) -> Result<(StatusCode, Json<WordList>)> {
    let list = word_lists::new_word_list(auth.user_id, req, Utc::now())?;
    state.store.insert_word_list(&list).await?;

    tracing::info!(list_id = %list.id, words = list.total_words, "Created word list");
    Ok((StatusCode::CREATED, Json(list)))
}

/// PUT /api/wordlists/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(list_id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateWordListRequest>,
) -> Result<Json<WordList>> {
    let mut list = state
        .store
        .get_word_list(auth.user_id, list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Word list not found".to_string()))?;

    word_lists::apply_update(&mut list, req, Utc::now())?;

    if !state.store.update_word_list(&list).await? {
        return Err(ApiError::NotFound("Word list not found".to_string()));
    }

    tracing::info!(%list_id, words = list.total_words, "Updated word list");
    Ok(Json(list))
}

/// DELETE /api/wordlists/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(list_id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    if !state.store.delete_word_list(auth.user_id, list_id).await? {
        return Err(ApiError::NotFound("Word list not found".to_string()));
    }

    tracing::info!(%list_id, "Deleted word list");
    Ok(Json(MessageResponse {
        message: "Word list deleted".to_string(),
    }))
}

/// PUT /api/wordlists/:id/words/:word_id/progress
pub async fn update_progress(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path((list_id, word_id)): Path<(Uuid, Uuid)>,
    ApiJson(req): ApiJson<ProgressUpdateRequest>,
) -> Result<Json<Word>> {
    let is_correct = req
        .is_correct
        .ok_or_else(|| ApiError::Validation("isCorrect is required".to_string()))?;
    tracing::debug!(game_type = ?req.game_type, "Progress update");

    let word = progress::record_review(
        state.store.as_ref(),
        auth.user_id,
        list_id,
        word_id,
        is_correct,
        Utc::now(),
    )
    .await?;

    Ok(Json(word))
}
