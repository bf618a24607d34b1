//! Review outcome recording.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vocab_core::{MasteryLadder, ProgressAlgorithm};

use crate::db::Store;
use crate::error::{ApiError, Result};
use crate::models::Word;

/// Apply one review outcome to a word and persist the owning list.
///
/// The list is looked up by `(owner, list_id)`, so a list owned by someone
/// else is reported as missing. Nothing is written unless both the list and
/// the word exist.
pub async fn record_review(
    store: &dyn Store,
    owner: Uuid,
    list_id: Uuid,
    word_id: Uuid,
    is_correct: bool,
    now: DateTime<Utc>,
) -> Result<Word> {
    let mut list = store
        .get_word_list(owner, list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Word list not found".to_string()))?;

    let algorithm = MasteryLadder::default();
    let word = list
        .word_mut(word_id)
        .ok_or_else(|| ApiError::NotFound("Word not found".to_string()))?;

    let result = algorithm.apply(&word.progress, is_correct, now);
    word.progress = result.progress;
    let updated = word.clone();

    list.updated_at = now;
    if !store.update_word_list(&list).await? {
        return Err(ApiError::NotFound("Word list not found".to_string()));
    }

    tracing::info!(
        %list_id,
        %word_id,
        algorithm = algorithm.name(),
        is_correct,
        mastery_level = updated.progress.mastery_level,
        interval_days = result.interval_days,
        "Recorded review"
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use crate::db::MemoryStore;
    use crate::models::{ListStats, WordInput, WordList};

    async fn seeded(store: &MemoryStore, owner: Uuid, now: DateTime<Utc>) -> WordList {
        let word = Word::from_input(WordInput::new("사과", "táo"), now).unwrap();
        let list = WordList {
            id: Uuid::new_v4(),
            title: "Fruit".to_string(),
            description: None,
            category: WordList::DEFAULT_CATEGORY.to_string(),
            words: vec![word],
            author_id: owner,
            is_public: false,
            tags: Vec::new(),
            difficulty: WordList::DEFAULT_DIFFICULTY.to_string(),
            total_words: 1,
            stats: ListStats::default(),
            created_at: now,
            updated_at: now,
        };
        store.insert_word_list(&list).await.unwrap();
        list
    }

    #[tokio::test]
    async fn correct_answer_is_persisted_with_one_write() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let list = seeded(&store, owner, now).await;
        let word_id = list.words[0].id;
        let before = store.writes();

        let word = record_review(&store, owner, list.id, word_id, true, now)
            .await
            .unwrap();

        assert_eq!(store.writes(), before + 1);
        assert_eq!(word.progress.correct_count, 1);
        assert!((word.progress.mastery_level - 0.2).abs() < 1e-9);
        assert_eq!(word.progress.last_reviewed, Some(now));
        assert_eq!(word.progress.next_review, Some(now + Duration::days(1)));

        let stored = store.get_word_list(owner, list.id).await.unwrap().unwrap();
        assert_eq!(stored.words[0].progress, word.progress);
    }

    #[tokio::test]
    async fn missing_word_is_not_found_without_write() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let list = seeded(&store, owner, Utc::now()).await;
        let before = store.writes();

        let err = record_review(&store, owner, list.id, Uuid::new_v4(), true, Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Word not found"));
        assert_eq!(store.writes(), before);
    }

    #[tokio::test]
    async fn another_owner_sees_not_found() {
        let store = MemoryStore::new();
        let list = seeded(&store, Uuid::new_v4(), Utc::now()).await;
        let before = store.writes();

        let err = record_review(
            &store,
            Uuid::new_v4(),
            list.id,
            list.words[0].id,
            false,
            Utc::now(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Word list not found"));
        assert_eq!(store.writes(), before);
    }
}
