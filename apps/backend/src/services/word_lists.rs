//! Word list construction and editing.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{
    CreateWordListRequest, DueWord, ListStats, UpdateWordListRequest, Word, WordInput, WordList,
};

fn validated_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    Ok(title.to_string())
}

fn label_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Build a new list owned by `author_id`. Every word starts unreviewed.
pub fn new_word_list(
    author_id: Uuid,
    request: CreateWordListRequest,
    now: DateTime<Utc>,
) -> Result<WordList> {
    let title = validated_title(&request.title)?;
    let words = request
        .words
        .into_iter()
        .map(|input| Word::from_input(input, now))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut list = WordList {
        id: Uuid::new_v4(),
        title,
        description: request.description,
        category: label_or(request.category, WordList::DEFAULT_CATEGORY),
        words,
        author_id,
        is_public: request.is_public.unwrap_or(false),
        tags: request.tags.unwrap_or_default(),
        difficulty: label_or(request.difficulty, WordList::DEFAULT_DIFFICULTY),
        total_words: 0,
        stats: ListStats::default(),
        created_at: now,
        updated_at: now,
    };
    list.refresh_totals();
    Ok(list)
}

/// Rebuild the word vector. Inputs naming an existing word keep its progress.
fn replace_words(list: &mut WordList, inputs: Vec<WordInput>, now: DateTime<Utc>) -> Result<()> {
    let mut words = Vec::with_capacity(inputs.len());
    for input in inputs {
        let existing = input.id.and_then(|id| list.word(id)).cloned();
        let word = match existing {
            Some(mut word) => {
                word.revise(input)?;
                word
            }
            None => Word::from_input(input, now)?,
        };
        words.push(word);
    }
    list.words = words;
    list.refresh_totals();
    Ok(())
}

/// Apply a partial update. Nothing is changed if any field is invalid.
pub fn apply_update(
    list: &mut WordList,
    request: UpdateWordListRequest,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut updated = list.clone();

    if let Some(title) = request.title {
        updated.title = validated_title(&title)?;
    }
    if let Some(description) = request.description {
        updated.description = Some(description);
    }
    if let Some(category) = request.category {
        updated.category = label_or(Some(category), WordList::DEFAULT_CATEGORY);
    }
    if let Some(is_public) = request.is_public {
        updated.is_public = is_public;
    }
    if let Some(tags) = request.tags {
        updated.tags = tags;
    }
    if let Some(difficulty) = request.difficulty {
        updated.difficulty = label_or(Some(difficulty), WordList::DEFAULT_DIFFICULTY);
    }
    if let Some(words) = request.words {
        replace_words(&mut updated, words, now)?;
    }

    updated.updated_at = now;
    *list = updated;
    Ok(())
}

/// Words across `lists` whose review date has arrived.
pub fn due_words(lists: &[WordList], now: DateTime<Utc>) -> Vec<DueWord> {
    lists
        .iter()
        .flat_map(|list| {
            list.words
                .iter()
                .filter(move |word| word.progress.is_due(now))
                .map(move |word| DueWord {
                    word: word.clone(),
                    list_id: list.id,
                    list_title: list.title.clone(),
                })
        })
        .collect()
}
