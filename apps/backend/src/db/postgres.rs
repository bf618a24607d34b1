//! PostgreSQL database operations

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use uuid::Uuid;

use super::Store;
use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }
}

fn unique_violation_to_conflict(err: sqlx::Error, what: &str) -> ApiError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::Conflict(format!("{} already exists", what))
        }
        _ => ApiError::Store(err),
    }
}

#[async_trait]
impl Store for Database {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    // === User Repository ===

    async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, token,
                               profile, preferences, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.token)
        .bind(Json(&user.profile))
        .bind(Json(&user.preferences))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_violation_to_conflict(e, "User"))?;

        Ok(())
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, username, email, password_hash, token, profile, preferences,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(User::from))
    }

    async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, username, email, password_hash, token, profile, preferences,
                   created_at, updated_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, username, email, password_hash, token, profile, preferences,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(User::from))
    }

    async fn user_exists(&self, username: &str, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_user(&self, user: &User) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, token = $5,
                profile = $6, preferences = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.token)
        .bind(Json(&user.profile))
        .bind(Json(&user.preferences))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Word List Repository ===

    async fn insert_word_list(&self, list: &WordList) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO word_lists (id, author_id, title, description, category, words,
                                    is_public, tags, difficulty, total_words, stats,
                                    created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(list.id)
        .bind(list.author_id)
        .bind(&list.title)
        .bind(&list.description)
        .bind(&list.category)
        .bind(Json(&list.words))
        .bind(list.is_public)
        .bind(&list.tags)
        .bind(&list.difficulty)
        .bind(list.total_words as i32)
        .bind(Json(&list.stats))
        .bind(list.created_at)
        .bind(list.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_word_list(&self, author_id: Uuid, list_id: Uuid) -> Result<Option<WordList>> {
        let list = sqlx::query_as::<_, DbWordList>(
            r#"
            SELECT id, author_id, title, description, category, words, is_public, tags,
                   difficulty, total_words, stats, created_at, updated_at
            FROM word_lists
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(list_id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(list.map(WordList::from))
    }

    async fn list_word_lists(&self, author_id: Uuid) -> Result<Vec<WordList>> {
        let lists = sqlx::query_as::<_, DbWordList>(
            r#"
            SELECT id, author_id, title, description, category, words, is_public, tags,
                   difficulty, total_words, stats, created_at, updated_at
            FROM word_lists
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lists.into_iter().map(WordList::from).collect())
    }

    async fn list_public_word_lists(&self, limit: usize) -> Result<Vec<PublicWordList>> {
        let rows = sqlx::query_as::<_, DbPublicWordList>(
            r#"
            SELECT wl.id, wl.author_id, wl.title, wl.description, wl.category, wl.words,
                   wl.is_public, wl.tags, wl.difficulty, wl.total_words, wl.stats,
                   wl.created_at, wl.updated_at, u.username AS author_username
            FROM word_lists wl
            JOIN users u ON u.id = wl.author_id
            WHERE wl.is_public
            ORDER BY COALESCE((wl.stats->>'totalStudents')::INT, 0) DESC, wl.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PublicWordList {
                list: row.list.into(),
                author_username: row.author_username,
            })
            .collect())
    }

    async fn update_word_list(&self, list: &WordList) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE word_lists
            SET title = $3, description = $4, category = $5, words = $6, is_public = $7,
                tags = $8, difficulty = $9, total_words = $10, stats = $11, updated_at = $12
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(list.id)
        .bind(list.author_id)
        .bind(&list.title)
        .bind(&list.description)
        .bind(&list.category)
        .bind(Json(&list.words))
        .bind(list.is_public)
        .bind(&list.tags)
        .bind(&list.difficulty)
        .bind(list.total_words as i32)
        .bind(Json(&list.stats))
        .bind(list.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_word_list(&self, author_id: Uuid, list_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM word_lists
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(list_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Game Session Repository ===

    async fn insert_game_session(&self, session: &GameSession) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO game_sessions (id, user_id, word_list_id, game_type, results,
                                       accuracy, completed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.word_list_id)
        .bind(session.game_type.as_str())
        .bind(Json(&session.results))
        .bind(session.results.accuracy())
        .bind(session.completed)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn recent_game_sessions(&self, user_id: Uuid, limit: usize) -> Result<Vec<GameSession>> {
        let sessions = sqlx::query_as::<_, DbGameSession>(
            r#"
            SELECT id, user_id, word_list_id, game_type, results, completed, created_at
            FROM game_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions.into_iter().map(GameSession::from).collect())
    }

    async fn game_session_summary(&self, user_id: Uuid) -> Result<SessionSummary> {
        let (total, average): (i64, f64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(AVG(accuracy), 0)::FLOAT8
            FROM game_sessions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(SessionSummary {
            total_sessions: total.max(0) as u64,
            average_accuracy: average,
        })
    }

    // === User Data Repository ===

    async fn get_user_data(&self, user_id: &str, data_type: &str) -> Result<Option<UserData>> {
        let data = sqlx::query_as::<_, DbUserData>(
            r#"
            SELECT user_id, data_type, data, created_at, updated_at
            FROM user_data
            WHERE user_id = $1 AND data_type = $2
            "#,
        )
        .bind(user_id)
        .bind(data_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(data.map(UserData::from))
    }

    async fn insert_user_data(&self, data: &UserData) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_data (user_id, data_type, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&data.user_id)
        .bind(&data.data_type)
        .bind(Json(&data.data))
        .bind(data.created_at)
        .bind(data.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_violation_to_conflict(e, "User data"))?;

        Ok(())
    }

    async fn update_user_data(&self, data: &UserData) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE user_data
            SET data = $3, updated_at = $4
            WHERE user_id = $1 AND data_type = $2
            "#,
        )
        .bind(&data.user_id)
        .bind(&data.data_type)
        .bind(Json(&data.data))
        .bind(data.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
