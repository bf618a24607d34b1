//! User data blob endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::error::{ApiJson, Result};
use crate::models::*;
use crate::services::user_data;
use crate::AppState;

/// POST /api/save-data
pub async fn save(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SaveDataRequest>,
) -> Result<Json<SaveDataResponse>> {
    let outcome = user_data::save(
        state.store.as_ref(),
        req.data_type,
        req.data,
        req.user_id,
        Utc::now(),
    )
    .await?;

    let message = match outcome {
        SaveOutcome::Created => "Data created",
        SaveOutcome::Updated => "Data updated",
    };

    Ok(Json(SaveDataResponse {
        success: true,
        message: message.to_string(),
        outcome,
    }))
}

/// GET /api/load-data?type=&userId=
pub async fn load(
    State(state): State<AppState>,
    Query(query): Query<LoadDataQuery>,
) -> Result<Json<LoadDataResponse>> {
    let response = user_data::load(state.store.as_ref(), query.data_type, query.user_id).await?;
    Ok(Json(response))
}
