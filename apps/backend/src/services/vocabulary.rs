//! AI vocabulary generation.

use vocab_core::extract_words;
use vocab_core::prompt::{vocabulary_prompt, CONNECTION_TEST_PROMPT};

use crate::error::{ApiError, Result};
use crate::models::{AiTestResponse, GenerateVocabularyRequest, GenerateVocabularyResponse};
use crate::services::gemini::VocabularyGenerator;

pub const DEFAULT_COUNT: usize = 20;
pub const MAX_COUNT: usize = 50;

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{} is required", field)))
}

/// Ask the generator for a batch of words and keep the usable ones.
pub async fn generate_vocabulary(
    generator: &dyn VocabularyGenerator,
    request: GenerateVocabularyRequest,
) -> Result<GenerateVocabularyResponse> {
    let category = required(request.category, "category")?;
    let difficulty = required(request.difficulty, "difficulty")?;
    let count = request.count.unwrap_or(DEFAULT_COUNT);
    if !(1..=MAX_COUNT).contains(&count) {
        return Err(ApiError::Validation(format!(
            "count must be between 1 and {}",
            MAX_COUNT
        )));
    }

    tracing::info!(
        %category,
        %difficulty,
        count,
        model = generator.model(),
        "Generating vocabulary"
    );

    let prompt = vocabulary_prompt(&category, &difficulty, count);
    let text = generator.generate(&prompt).await?;
    let words = extract_words(&text, count);

    if words.is_empty() {
        tracing::debug!(reply = %text, "No words could be extracted");
        return Err(ApiError::Ai(
            "Could not extract any vocabulary from the generator reply".to_string(),
        ));
    }

    tracing::info!(extracted = words.len(), requested = count, "Generated vocabulary");

    Ok(GenerateVocabularyResponse {
        success: true,
        count: words.len(),
        words,
        category,
        difficulty,
        requested_count: count,
    })
}

/// Send a fixed prompt and return the raw reply.
pub async fn test_connection(generator: &dyn VocabularyGenerator) -> Result<AiTestResponse> {
    let response = generator.generate(CONNECTION_TEST_PROMPT).await?;

    Ok(AiTestResponse {
        success: true,
        message: "Generator connection is working".to_string(),
        response,
        model: generator.model().to_string(),
    })
}
