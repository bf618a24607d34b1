//! Core types for the vocabulary domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Lowest difficulty a word can carry.
pub const MIN_DIFFICULTY: u8 = 1;
/// Highest difficulty a word can carry.
pub const MAX_DIFFICULTY: u8 = 5;

/// Per-word spaced repetition state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
    pub mastery_level: f64,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            correct_count: 0,
            incorrect_count: 0,
            last_reviewed: None,
            next_review: None,
            mastery_level: 0.0,
        }
    }
}

impl ProgressRecord {
    /// Record for a word that was just added to a list. Due immediately.
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            next_review: Some(now),
            ..Default::default()
        }
    }

    /// A word with no scheduled review is always due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.map_or(true, |due| due <= now)
    }
}

/// Example sentence attached to a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub korean: String,
    #[serde(alias = "vietnamese")]
    pub translation: String,
}

/// Word stored inside a word list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: Uuid,
    pub korean_text: String,
    pub translation: String,
    pub pronunciation: Option<String>,
    pub difficulty: u8,
    pub category: Option<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub progress: ProgressRecord,
}

/// Word as submitted by a client. Progress is never accepted from input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(alias = "korean", alias = "word")]
    pub korean_text: String,
    #[serde(alias = "vietnamese", alias = "meaning")]
    pub translation: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl WordInput {
    /// Minimal input with just the two required fields.
    pub fn new(korean_text: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            id: None,
            korean_text: korean_text.into(),
            translation: translation.into(),
            pronunciation: None,
            difficulty: None,
            category: None,
            examples: Vec::new(),
        }
    }

    fn validated_difficulty(&self) -> Result<u8> {
        let difficulty = self.difficulty.unwrap_or(MIN_DIFFICULTY);
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(CoreError::InvalidDifficulty(difficulty));
        }
        Ok(difficulty)
    }

    fn validated_text(&self) -> Result<(String, String)> {
        let korean = self.korean_text.trim();
        if korean.is_empty() {
            return Err(CoreError::EmptyField { field: "koreanText" });
        }
        let translation = self.translation.trim();
        if translation.is_empty() {
            return Err(CoreError::EmptyField { field: "translation" });
        }
        Ok((korean.to_string(), translation.to_string()))
    }
}

impl Word {
    /// Build a new word from client input with a fresh progress record.
    pub fn from_input(input: WordInput, now: DateTime<Utc>) -> Result<Self> {
        let (korean_text, translation) = input.validated_text()?;
        let difficulty = input.validated_difficulty()?;

        Ok(Self {
            id: Uuid::new_v4(),
            korean_text,
            translation,
            pronunciation: non_empty(input.pronunciation),
            difficulty,
            category: non_empty(input.category),
            examples: input.examples,
            progress: ProgressRecord::new_at(now),
        })
    }

    /// Overwrite the descriptive fields from input, keeping id and progress.
    pub fn revise(&mut self, input: WordInput) -> Result<()> {
        let (korean_text, translation) = input.validated_text()?;
        let difficulty = input.validated_difficulty()?;

        self.korean_text = korean_text;
        self.translation = translation;
        self.pronunciation = non_empty(input.pronunciation);
        self.difficulty = difficulty;
        self.category = non_empty(input.category);
        self.examples = input.examples;
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Game modes a practice session can be played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Flashcard,
    Quiz,
    Fillblank,
    Scramble,
    Matching,
    Sentence,
}

impl Default for GameType {
    fn default() -> Self {
        Self::Flashcard
    }
}

impl GameType {
    /// Parse from the stored lowercase name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "flashcard" => Some(Self::Flashcard),
            "quiz" => Some(Self::Quiz),
            "fillblank" => Some(Self::Fillblank),
            "scramble" => Some(Self::Scramble),
            "matching" => Some(Self::Matching),
            "sentence" => Some(Self::Sentence),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flashcard => "flashcard",
            Self::Quiz => "quiz",
            Self::Fillblank => "fillblank",
            Self::Scramble => "scramble",
            Self::Matching => "matching",
            Self::Sentence => "sentence",
        }
    }
}

/// One answered word inside a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedWord {
    pub word_id: Uuid,
    pub is_correct: bool,
    #[serde(default)]
    pub time_spent: Option<u32>,
}

/// Outcome of a finished game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResults {
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Seconds spent on the whole session.
    #[serde(default)]
    pub time_spent: Option<u32>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub words_reviewed: Vec<ReviewedWord>,
}

impl SessionResults {
    /// Accuracy threshold at which correct words count as mastered.
    pub const MASTERY_ACCURACY: f64 = 0.8;

    /// Check counts and fill in accuracy when the client left it out.
    pub fn validated(mut self) -> Result<Self> {
        if self.total_questions == 0 {
            return Err(CoreError::NoQuestions);
        }
        if self.correct_answers > self.total_questions {
            return Err(CoreError::CorrectExceedsTotal {
                correct: self.correct_answers,
                total: self.total_questions,
            });
        }
        match self.accuracy {
            Some(a) if !(0.0..=1.0).contains(&a) => return Err(CoreError::InvalidAccuracy(a)),
            Some(_) => {}
            None => {
                self.accuracy =
                    Some(f64::from(self.correct_answers) / f64::from(self.total_questions));
            }
        }
        Ok(self)
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy.unwrap_or(0.0)
    }

    pub fn correct_word_count(&self) -> u32 {
        self.words_reviewed.iter().filter(|w| w.is_correct).count() as u32
    }

    /// Number of words to add to the player's mastered total.
    pub fn newly_mastered(&self) -> u32 {
        if self.accuracy() >= Self::MASTERY_ACCURACY {
            self.correct_word_count()
        } else {
            0
        }
    }
}
