//! Test fixtures and factory functions for creating request bodies.

use serde_json::{json, Value};

/// Registration body with a derived email and a valid password.
pub fn registration(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": "secret123",
    })
}

/// Word list creation body.
///
/// # Arguments
/// * `title` - List title
/// * `words` - `(korean, translation)` pairs
pub fn word_list_request(title: &str, words: &[(&str, &str)]) -> Value {
    let words: Vec<Value> = words
        .iter()
        .map(|(korean, translation)| {
            json!({
                "koreanText": korean,
                "translation": translation,
            })
        })
        .collect();

    json!({
        "title": title,
        "description": "Words used every day",
        "words": words,
    })
}

/// Progress update body.
pub fn progress(is_correct: bool) -> Value {
    json!({ "isCorrect": is_correct, "gameType": "flashcard" })
}

/// Game session body with `correct` of `total` answers right.
pub fn session(word_list_id: &str, correct: u32, total: u32, word_ids: &[&str]) -> Value {
    let reviewed: Vec<Value> = word_ids
        .iter()
        .map(|id| json!({ "wordId": id, "isCorrect": true }))
        .collect();

    json!({
        "wordListId": word_list_id,
        "gameType": "quiz",
        "results": {
            "totalQuestions": total,
            "correctAnswers": correct,
            "timeSpent": 90,
            "wordsReviewed": reviewed,
        },
        "completed": true,
    })
}

/// Well-formed generator reply wrapped in a code fence.
pub const GENERATED_REPLY: &str = r#"Here are your words:
```json
[
  {"korean": "비행기", "vietnamese": "máy bay", "pronunciation": "bihaenggi"},
  {"korean": "여권", "vietnamese": "hộ chiếu", "pronunciation": "yeogwon"},
  {"korean": "호텔", "vietnamese": "khách sạn", "pronunciation": "hotel"}
]
```"#;
