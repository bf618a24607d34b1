//! Best-effort extraction of generated words from model output.
//!
//! Model replies are supposed to be a bare JSON array but often arrive
//! wrapped in code fences or prose, or as a plain list. Nothing here fails:
//! unusable input yields an empty list.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A word proposed by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedWord {
    pub korean: String,
    #[serde(alias = "vietnamese")]
    pub translation: String,
    pub pronunciation: String,
}

/// Pull up to `limit` valid words out of `text`.
pub fn extract_words(text: &str, limit: usize) -> Vec<GeneratedWord> {
    let candidates = parse_json_array(text).unwrap_or_else(|| extract_from_lines(text));

    candidates
        .into_iter()
        .filter_map(Candidate::into_word)
        .take(limit)
        .collect()
}

/// True if the text contains at least one Hangul syllable.
pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
}

#[derive(Debug, Default)]
struct Candidate {
    korean: Option<String>,
    translation: Option<String>,
    pronunciation: Option<String>,
}

impl Candidate {
    fn from_value(value: &Value) -> Self {
        let field = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| value.get(*name).and_then(Value::as_str))
                .map(str::to_string)
        };

        Self {
            korean: field(&["korean", "koreanText", "word"]),
            translation: field(&["translation", "vietnamese", "meaning"]),
            pronunciation: field(&["pronunciation", "romanization"]),
        }
    }

    fn into_word(self) -> Option<GeneratedWord> {
        let korean = self.korean?.trim().to_string();
        let translation = self.translation?.trim().to_string();
        let pronunciation = self.pronunciation?.trim().to_string();

        if korean.is_empty() || translation.is_empty() || pronunciation.is_empty() {
            return None;
        }
        if !contains_hangul(&korean) {
            return None;
        }

        Some(GeneratedWord {
            korean,
            translation,
            pronunciation,
        })
    }
}

fn parse_json_array(text: &str) -> Option<Vec<Candidate>> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let body = match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned,
    };

    let values: Vec<Value> = serde_json::from_str(body).ok()?;
    Some(values.iter().map(Candidate::from_value).collect())
}

static LINE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // 밥 - cơm - bap
        r"([가-힣]+)\s*-\s*([^-\n]+?)\s*-\s*([a-zA-Z\s]+)",
        // "korean": "밥", "vietnamese": "cơm", "pronunciation": "bap"
        r#""korean":\s*"([^"]+)".*?"(?:vietnamese|translation)":\s*"([^"]+)".*?"pronunciation":\s*"([^"]+)""#,
        // 밥: cơm (bap)
        r"([가-힣]+):\s*([^-\n(]+?)\s*\(([^)]+)\)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

fn extract_from_lines(text: &str) -> Vec<Candidate> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            LINE_PATTERNS.iter().find_map(|re| {
                let caps = re.captures(line)?;
                let korean = caps.get(1)?.as_str();
                if !contains_hangul(korean) {
                    return None;
                }
                Some(Candidate {
                    korean: Some(korean.to_string()),
                    translation: Some(caps.get(2)?.as_str().to_string()),
                    pronunciation: Some(caps.get(3)?.as_str().to_string()),
                })
            })
        })
        .collect()
}
