//! Free-form client data blobs.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::db::Store;
use crate::error::{ApiError, Result};
use crate::models::{LoadDataMetadata, LoadDataResponse, SaveOutcome, UserData};

pub const DEFAULT_USER_ID: &str = "default_user";

fn user_id_or_default(user_id: Option<String>) -> String {
    user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

fn required_type(data_type: Option<String>) -> Result<String> {
    data_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("type is required".to_string()))
}

/// Replace an existing blob, or create it when there is none.
pub async fn save(
    store: &dyn Store,
    data_type: Option<String>,
    data: Option<Value>,
    user_id: Option<String>,
    now: DateTime<Utc>,
) -> Result<SaveOutcome> {
    let data_type = required_type(data_type)?;
    let data = data.ok_or_else(|| ApiError::Validation("data is required".to_string()))?;
    let user_id = user_id_or_default(user_id);

    let blob = UserData {
        user_id,
        data_type,
        data,
        created_at: now,
        updated_at: now,
    };

    let outcome = match store.get_user_data(&blob.user_id, &blob.data_type).await? {
        Some(_) if store.update_user_data(&blob).await? => SaveOutcome::Updated,
        _ => {
            store.insert_user_data(&blob).await?;
            SaveOutcome::Created
        }
    };

    tracing::info!(
        user_id = %blob.user_id,
        data_type = %blob.data_type,
        ?outcome,
        "Saved user data"
    );
    Ok(outcome)
}

/// Fetch a blob with its size and last update time.
pub async fn load(
    store: &dyn Store,
    data_type: Option<String>,
    user_id: Option<String>,
) -> Result<LoadDataResponse> {
    let data_type = required_type(data_type)?;
    let user_id = user_id_or_default(user_id);

    let blob = store
        .get_user_data(&user_id, &data_type)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No {} data found", data_type)))?;

    let data_size = serde_json::to_string(&blob.data)
        .map(|s| s.len())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(LoadDataResponse {
        success: true,
        metadata: LoadDataMetadata {
            data_type: blob.data_type,
            last_updated: blob.updated_at,
            data_size,
        },
        data: blob.data,
    })
}
