//! In-process document store

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::{ApiError, Result};
use crate::models::*;

#[derive(Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    word_lists: HashMap<Uuid, WordList>,
    game_sessions: Vec<GameSession>,
    user_data: HashMap<(String, String), UserData>,
}

/// Store backed by hash maps behind a single lock.
///
/// Nothing survives a restart. Every successful mutation bumps a counter so
/// callers can assert that a failed operation left the store untouched.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful mutations so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {}

    // === Users ===

    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut inner = self.inner.write().await;
        let taken = inner.users.values().any(|u| {
            u.username == user.username || u.email == user.email || u.token == user.token
        });
        if taken || inner.users.contains_key(&user.id) {
            return Err(ApiError::Conflict("User already exists".to_string()));
        }
        inner.users.insert(user.id, user.clone());
        self.record_write();
        Ok(())
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&user_id).cloned())
    }

    async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.token == token).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn user_exists(&self, username: &str, email: &str) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .any(|u| u.username == username || u.email == email))
    }

    async fn update_user(&self, user: &User) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                self.record_write();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // === Word lists ===

    async fn insert_word_list(&self, list: &WordList) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.word_lists.contains_key(&list.id) {
            return Err(ApiError::Conflict("Word list already exists".to_string()));
        }
        inner.word_lists.insert(list.id, list.clone());
        self.record_write();
        Ok(())
    }

    async fn get_word_list(&self, author_id: Uuid, list_id: Uuid) -> Result<Option<WordList>> {
        let inner = self.inner.read().await;
        Ok(inner
            .word_lists
            .get(&list_id)
            .filter(|list| list.author_id == author_id)
            .cloned())
    }

    async fn list_word_lists(&self, author_id: Uuid) -> Result<Vec<WordList>> {
        let inner = self.inner.read().await;
        let mut lists: Vec<WordList> = inner
            .word_lists
            .values()
            .filter(|list| list.author_id == author_id)
            .cloned()
            .collect();
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(lists)
    }

    async fn list_public_word_lists(&self, limit: usize) -> Result<Vec<PublicWordList>> {
        let inner = self.inner.read().await;
        let mut lists: Vec<PublicWordList> = inner
            .word_lists
            .values()
            .filter(|list| list.is_public)
            .filter_map(|list| {
                let author = inner.users.get(&list.author_id)?;
                Some(PublicWordList {
                    list: list.clone(),
                    author_username: author.username.clone(),
                })
            })
            .collect();
        lists.sort_by(|a, b| {
            b.list
                .stats
                .total_students
                .cmp(&a.list.stats.total_students)
                .then_with(|| b.list.created_at.cmp(&a.list.created_at))
        });
        lists.truncate(limit);
        Ok(lists)
    }

    async fn update_word_list(&self, list: &WordList) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.word_lists.get_mut(&list.id) {
            Some(existing) if existing.author_id == list.author_id => {
                *existing = list.clone();
                self.record_write();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_word_list(&self, author_id: Uuid, list_id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let owned = inner
            .word_lists
            .get(&list_id)
            .is_some_and(|list| list.author_id == author_id);
        if !owned {
            return Ok(false);
        }
        inner.word_lists.remove(&list_id);
        self.record_write();
        Ok(true)
    }

    // === Game sessions ===

    async fn insert_game_session(&self, session: &GameSession) -> Result<()> {
        self.inner.write().await.game_sessions.push(session.clone());
        self.record_write();
        Ok(())
    }

    async fn recent_game_sessions(&self, user_id: Uuid, limit: usize) -> Result<Vec<GameSession>> {
        let inner = self.inner.read().await;
        let mut sessions: Vec<GameSession> = inner
            .game_sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sessions.truncate(limit);
        Ok(sessions)
    }

    async fn game_session_summary(&self, user_id: Uuid) -> Result<SessionSummary> {
        let inner = self.inner.read().await;
        let accuracies: Vec<f64> = inner
            .game_sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.results.accuracy())
            .collect();

        if accuracies.is_empty() {
            return Ok(SessionSummary::default());
        }

        Ok(SessionSummary {
            total_sessions: accuracies.len() as u64,
            average_accuracy: accuracies.iter().sum::<f64>() / accuracies.len() as f64,
        })
    }

    // === User data ===

    async fn get_user_data(&self, user_id: &str, data_type: &str) -> Result<Option<UserData>> {
        let inner = self.inner.read().await;
        Ok(inner
            .user_data
            .get(&(user_id.to_string(), data_type.to_string()))
            .cloned())
    }

    async fn insert_user_data(&self, data: &UserData) -> Result<()> {
        let mut inner = self.inner.write().await;
        let key = (data.user_id.clone(), data.data_type.clone());
        if inner.user_data.contains_key(&key) {
            return Err(ApiError::Conflict("User data already exists".to_string()));
        }
        inner.user_data.insert(key, data.clone());
        self.record_write();
        Ok(())
    }

    async fn update_user_data(&self, data: &UserData) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let key = (data.user_id.clone(), data.data_type.clone());
        match inner.user_data.get_mut(&key) {
            Some(existing) => {
                existing.data = data.data.clone();
                existing.updated_at = data.updated_at;
                self.record_write();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    fn user(name: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "hash".to_string(),
            token: Uuid::new_v4().to_string(),
            profile: UserProfile::default(),
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn list(author: Uuid, title: &str, students: u32, public: bool) -> WordList {
        let now = Utc::now();
        WordList {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            category: WordList::DEFAULT_CATEGORY.to_string(),
            words: Vec::new(),
            author_id: author,
            is_public: public,
            tags: Vec::new(),
            difficulty: WordList::DEFAULT_DIFFICULTY.to_string(),
            total_words: 0,
            stats: ListStats {
                total_students: students,
                ..ListStats::default()
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let store = MemoryStore::new();
        store.insert_user(&user("minji")).await.unwrap();

        let mut other = user("minji");
        other.email = "other@example.com".to_string();
        let err = store.insert_user(&other).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn updating_a_missing_user_reports_false() {
        let store = MemoryStore::new();
        assert!(!store.update_user(&user("ghost")).await.unwrap());
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn word_lists_are_scoped_by_author() {
        let store = MemoryStore::new();
        let owner = user("owner");
        let stranger = user("stranger");
        let owned = list(owner.id, "Food", 0, false);
        store.insert_word_list(&owned).await.unwrap();

        assert!(store.get_word_list(owner.id, owned.id).await.unwrap().is_some());
        assert!(store.get_word_list(stranger.id, owned.id).await.unwrap().is_none());
        assert!(!store.delete_word_list(stranger.id, owned.id).await.unwrap());

        let mut hijacked = owned.clone();
        hijacked.author_id = stranger.id;
        assert!(!store.update_word_list(&hijacked).await.unwrap());
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn public_lists_are_ranked_by_students() {
        let store = MemoryStore::new();
        let author = user("author");
        store.insert_user(&author).await.unwrap();
        store.insert_word_list(&list(author.id, "Quiet", 2, true)).await.unwrap();
        store.insert_word_list(&list(author.id, "Popular", 40, true)).await.unwrap();
        store.insert_word_list(&list(author.id, "Private", 99, false)).await.unwrap();

        let public = store.list_public_word_lists(20).await.unwrap();
        let titles: Vec<&str> = public.iter().map(|p| p.list.title.as_str()).collect();
        assert_eq!(titles, vec!["Popular", "Quiet"]);
        assert_eq!(public[0].author_username, "author");

        assert_eq!(store.list_public_word_lists(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn session_summary_averages_accuracy() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        for (i, correct) in [8u32, 4].into_iter().enumerate() {
            let results = SessionResults {
                total_questions: 10,
                correct_answers: correct,
                time_spent: None,
                accuracy: None,
                words_reviewed: Vec::new(),
            }
            .validated()
            .unwrap();
            store
                .insert_game_session(&GameSession {
                    id: Uuid::new_v4(),
                    user_id,
                    word_list_id: Uuid::new_v4(),
                    game_type: GameType::Quiz,
                    results,
                    completed: true,
                    created_at: now + Duration::seconds(i as i64),
                })
                .await
                .unwrap();
        }

        let summary = store.game_session_summary(user_id).await.unwrap();
        assert_eq!(summary.total_sessions, 2);
        assert!((summary.average_accuracy - 0.6).abs() < 1e-9);

        let recent = store.recent_game_sessions(user_id, 1).await.unwrap();
        assert_eq!(recent[0].results.correct_answers, 4);

        let empty = store.game_session_summary(Uuid::new_v4()).await.unwrap();
        assert_eq!(empty, SessionSummary::default());
    }

    #[tokio::test]
    async fn user_data_update_keeps_created_at() {
        let store = MemoryStore::new();
        let created = Utc::now() - Duration::hours(1);
        let blob = UserData {
            user_id: "default".to_string(),
            data_type: "favorites".to_string(),
            data: serde_json::json!([1]),
            created_at: created,
            updated_at: created,
        };
        assert!(!store.update_user_data(&blob).await.unwrap());
        store.insert_user_data(&blob).await.unwrap();

        let later = UserData {
            data: serde_json::json!([1, 2]),
            updated_at: Utc::now(),
            created_at: Utc::now(),
            ..blob.clone()
        };
        assert!(store.update_user_data(&later).await.unwrap());

        let stored = store.get_user_data("default", "favorites").await.unwrap().unwrap();
        assert_eq!(stored.data, serde_json::json!([1, 2]));
        assert_eq!(stored.created_at, created);
    }
}
