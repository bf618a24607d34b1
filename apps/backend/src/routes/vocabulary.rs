//! AI vocabulary endpoints

use axum::{extract::State, Json};

use crate::error::{ApiJson, Result};
use crate::models::*;
use crate::services::vocabulary;
use crate::AppState;

/// POST /api/generate-vocabulary
pub async fn generate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateVocabularyRequest>,
) -> Result<Json<GenerateVocabularyResponse>> {
    let generator = state.generator()?;
    let response = vocabulary::generate_vocabulary(generator.as_ref(), req).await?;
    Ok(Json(response))
}

/// GET /api/test-ai
pub async fn test_ai(State(state): State<AppState>) -> Result<Json<AiTestResponse>> {
    let generator = state.generator()?;
    let response = vocabulary::test_connection(generator.as_ref()).await?;
    Ok(Json(response))
}
