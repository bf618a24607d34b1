//! Persistence layer.
//!
//! Routes only see the [`Store`] trait. `Database` keeps documents in
//! PostgreSQL; `MemoryStore` keeps them in process memory for development
//! and tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

pub use memory::MemoryStore;
pub use postgres::Database;

/// Keyed document store used by the HTTP layer.
///
/// Every word-list lookup is scoped by `(author, id)`, so a list that belongs
/// to someone else looks exactly like a missing one. Writes are explicit:
/// `insert_*` creates, `update_*` replaces an existing document and reports
/// whether one was found.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Check connectivity.
    async fn ping(&self) -> Result<()>;

    /// Release connections. Called once after the server stops.
    async fn close(&self);

    // === Users ===

    async fn insert_user(&self, user: &User) -> Result<()>;

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>>;

    async fn get_user_by_token(&self, token: &str) -> Result<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// True if either the username or the email is already registered.
    async fn user_exists(&self, username: &str, email: &str) -> Result<bool>;

    async fn update_user(&self, user: &User) -> Result<bool>;

    // === Word lists ===

    async fn insert_word_list(&self, list: &WordList) -> Result<()>;

    async fn get_word_list(&self, author_id: Uuid, list_id: Uuid) -> Result<Option<WordList>>;

    /// Lists owned by `author_id`, newest first.
    async fn list_word_lists(&self, author_id: Uuid) -> Result<Vec<WordList>>;

    /// Public lists ordered by student count, most popular first.
    async fn list_public_word_lists(&self, limit: usize) -> Result<Vec<PublicWordList>>;

    /// Replace the stored list with the same `(author_id, id)`.
    async fn update_word_list(&self, list: &WordList) -> Result<bool>;

    async fn delete_word_list(&self, author_id: Uuid, list_id: Uuid) -> Result<bool>;

    // === Game sessions ===

    async fn insert_game_session(&self, session: &GameSession) -> Result<()>;

    /// Most recent sessions first.
    async fn recent_game_sessions(&self, user_id: Uuid, limit: usize) -> Result<Vec<GameSession>>;

    async fn game_session_summary(&self, user_id: Uuid) -> Result<SessionSummary>;

    // === User data ===

    async fn get_user_data(&self, user_id: &str, data_type: &str) -> Result<Option<UserData>>;

    async fn insert_user_data(&self, data: &UserData) -> Result<()>;

    /// Replace `data` and `updated_at` of an existing blob.
    async fn update_user_data(&self, data: &UserData) -> Result<bool>;
}
