//! Game session recording and learner statistics.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::Store;
use crate::error::{ApiError, Result};
use crate::models::{CreateSessionRequest, GameSession, UserStatsResponse};

pub const RECENT_SESSION_LIMIT: usize = 10;

/// Store a finished session and fold it into the user's profile counters.
pub async fn record_session(
    store: &dyn Store,
    user_id: Uuid,
    request: CreateSessionRequest,
    now: DateTime<Utc>,
) -> Result<GameSession> {
    let results = request.results.validated()?;

    let mut user = store
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let session = GameSession {
        id: Uuid::new_v4(),
        user_id,
        word_list_id: request.word_list_id,
        game_type: request.game_type,
        results,
        completed: request.completed,
        created_at: now,
    };
    let mastered = session.results.newly_mastered();
    user.profile.total_sessions += 1;
    user.profile.mastered_words += mastered;
    user.updated_at = now;
    if !store.update_user(&user).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    store.insert_game_session(&session).await?;

    tracing::info!(
        %user_id,
        session_id = %session.id,
        game_type = session.game_type.as_str(),
        accuracy = session.results.accuracy(),
        mastered,
        "Recorded game session"
    );

    Ok(session)
}

/// Profile counters plus session aggregates.
pub async fn user_stats(store: &dyn Store, user_id: Uuid) -> Result<UserStatsResponse> {
    let user = store
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let summary = store.game_session_summary(user_id).await?;
    let recent_sessions = store
        .recent_game_sessions(user_id, RECENT_SESSION_LIMIT)
        .await?;

    Ok(UserStatsResponse {
        profile: user.profile,
        total_sessions: summary.total_sessions,
        average_accuracy: summary.average_accuracy,
        recent_sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::db::MemoryStore;
    use crate::models::{
        GameType, ReviewedWord, SessionResults, User, UserPreferences, UserProfile,
    };

    async fn seeded_user(store: &MemoryStore) -> Uuid {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: "jisoo".to_string(),
            email: "jisoo@example.com".to_string(),
            password_hash: String::new(),
            token: Uuid::new_v4().to_string(),
            profile: UserProfile::default(),
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        };
        store.insert_user(&user).await.unwrap();
        user.id
    }

    fn session(correct: u32, total: u32, reviewed_correct: usize) -> CreateSessionRequest {
        CreateSessionRequest {
            word_list_id: Uuid::new_v4(),
            game_type: GameType::Quiz,
            results: SessionResults {
                total_questions: total,
                correct_answers: correct,
                time_spent: Some(60),
                accuracy: None,
                words_reviewed: (0..reviewed_correct)
                    .map(|_| ReviewedWord {
                        word_id: Uuid::new_v4(),
                        is_correct: true,
                        time_spent: None,
                    })
                    .collect(),
            },
            completed: true,
        }
    }

    #[tokio::test]
    async fn mastered_words_grow_only_at_high_accuracy() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store).await;

        record_session(&store, user_id, session(7, 10, 7), Utc::now()).await.unwrap();
        let user = store.get_user(user_id).await.unwrap().unwrap();
        assert_eq!(user.profile.total_sessions, 1);
        assert_eq!(user.profile.mastered_words, 0);

        record_session(&store, user_id, session(8, 10, 8), Utc::now()).await.unwrap();
        let user = store.get_user(user_id).await.unwrap().unwrap();
        assert_eq!(user.profile.total_sessions, 2);
        assert_eq!(user.profile.mastered_words, 8);
    }

    #[tokio::test]
    async fn invalid_results_are_rejected_without_write() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store).await;
        let before = store.writes();

        let err = record_session(&store, user_id, session(11, 10, 0), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(store.writes(), before);
    }

    #[tokio::test]
    async fn unknown_user_stores_no_session() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();

        let err = record_session(&store, user_id, session(8, 10, 8), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "User not found"));
        assert_eq!(store.writes(), 0);
        assert!(store
            .recent_game_sessions(user_id, RECENT_SESSION_LIMIT)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn stats_start_at_zero() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store).await;

        let stats = user_stats(&store, user_id).await.unwrap();
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.average_accuracy, 0.0);
        assert!(stats.recent_sessions.is_empty());
    }
}
