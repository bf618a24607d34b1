//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from vocab-core
pub use vocab_core::types::{
    Example, GameType, ProgressRecord, ReviewedWord, SessionResults, Word, WordInput,
};
pub use vocab_core::GeneratedWord;

// === Domain Entities ===

/// Learner profile counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub level: String,
    pub study_streak: u32,
    pub total_words_learned: u32,
    pub mastered_words: u32,
    pub total_sessions: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            display_name: None,
            avatar: None,
            level: "beginner".to_string(),
            study_streak: 0,
            total_words_learned: 0,
            mastered_words: 0,
            total_sessions: 0,
        }
    }
}

/// Learner preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub study_reminder: bool,
    pub voice_enabled: bool,
    pub difficulty: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            study_reminder: true,
            voice_enabled: true,
            difficulty: "mixed".to_string(),
        }
    }
}

/// Registered user. Credentials never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(skip_serializing, default)]
    pub token: String,
    pub profile: UserProfile,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate popularity numbers for a word list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStats {
    pub total_students: u32,
    pub average_rating: f64,
    pub total_ratings: u32,
}

/// Ordered word collection owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordList {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub words: Vec<Word>,
    pub author_id: Uuid,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub difficulty: String,
    pub total_words: u32,
    pub stats: ListStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WordList {
    pub const DEFAULT_CATEGORY: &'static str = "general";
    pub const DEFAULT_DIFFICULTY: &'static str = "mixed";

    pub fn word(&self, word_id: Uuid) -> Option<&Word> {
        self.words.iter().find(|w| w.id == word_id)
    }

    pub fn word_mut(&mut self, word_id: Uuid) -> Option<&mut Word> {
        self.words.iter_mut().find(|w| w.id == word_id)
    }

    /// Keep `total_words` in line with the word vector.
    pub fn refresh_totals(&mut self) {
        self.total_words = self.words.len() as u32;
    }
}

/// Public list with its author's name attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicWordList {
    #[serde(flatten)]
    pub list: WordList,
    pub author_username: String,
}

/// Stored game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub word_list_id: Uuid,
    pub game_type: GameType,
    pub results: SessionResults,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Session count and mean accuracy for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_sessions: u64,
    pub average_accuracy: f64,
}

/// Free-form client data keyed by user and type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub user_id: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Word that is due for review, with the list it lives in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueWord {
    #[serde(flatten)]
    pub word: Word,
    pub list_id: Uuid,
    pub list_title: String,
}

// === Database Row Types ===

/// User row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub token: String,
    pub profile: Json<UserProfile>,
    pub preferences: Json<UserPreferences>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            token: row.token,
            profile: row.profile.0,
            preferences: row.preferences.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Word list row in PostgreSQL. Words live in a JSONB column.
#[derive(Debug, Clone, FromRow)]
pub struct DbWordList {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub words: Json<Vec<Word>>,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub difficulty: String,
    pub total_words: i32,
    pub stats: Json<ListStats>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbWordList> for WordList {
    fn from(row: DbWordList) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            words: row.words.0,
            author_id: row.author_id,
            is_public: row.is_public,
            tags: row.tags,
            difficulty: row.difficulty,
            total_words: row.total_words.max(0) as u32,
            stats: row.stats.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Public list row joined with the author's username.
#[derive(Debug, Clone, FromRow)]
pub struct DbPublicWordList {
    #[sqlx(flatten)]
    pub list: DbWordList,
    pub author_username: String,
}

/// Game session row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbGameSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub word_list_id: Uuid,
    pub game_type: String,
    pub results: Json<SessionResults>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbGameSession> for GameSession {
    fn from(row: DbGameSession) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            word_list_id: row.word_list_id,
            game_type: GameType::parse(&row.game_type).unwrap_or_default(),
            results: row.results.0,
            completed: row.completed,
            created_at: row.created_at,
        }
    }
}

/// User data row in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbUserData {
    pub user_id: String,
    pub data_type: String,
    pub data: Json<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbUserData> for UserData {
    fn from(row: DbUserData) -> Self {
        Self {
            user_id: row.user_id,
            data_type: row.data_type,
            data: row.data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// === API Request/Response Types ===

// Auth types
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Word list types
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWordListRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub words: Vec<WordInput>,
    pub category: Option<String>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWordListRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub words: Option<Vec<WordInput>>,
    pub category: Option<String>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateRequest {
    pub is_correct: Option<bool>,
    /// Free-form label from the client; not validated.
    pub game_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// Stats types
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub word_list_id: Uuid,
    pub game_type: GameType,
    pub results: SessionResults,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsResponse {
    pub profile: UserProfile,
    pub total_sessions: u64,
    pub average_accuracy: f64,
    pub recent_sessions: Vec<GameSession>,
}

// Vocabulary generation types
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateVocabularyRequest {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVocabularyResponse {
    pub success: bool,
    pub words: Vec<GeneratedWord>,
    pub category: String,
    pub difficulty: String,
    pub count: usize,
    pub requested_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AiTestResponse {
    pub success: bool,
    pub message: String,
    pub response: String,
    pub model: String,
}

// User data types
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDataRequest {
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    pub data: Option<Value>,
    pub user_id: Option<String>,
}

/// Which branch a save took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
    Created,
    Updated,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveDataResponse {
    pub success: bool,
    pub message: String,
    pub outcome: SaveOutcome,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadDataQuery {
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadDataMetadata {
    #[serde(rename = "type")]
    pub data_type: String,
    pub last_updated: DateTime<Utc>,
    pub data_size: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadDataResponse {
    pub success: bool,
    pub data: Value,
    pub metadata: LoadDataMetadata,
}

// Health
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub store: String,
    pub database: String,
    pub ai_configured: bool,
}
