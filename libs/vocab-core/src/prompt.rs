//! Prompt text for vocabulary generation.

/// English name for a Vietnamese topic label. Unknown labels pass through.
pub fn english_category(category: &str) -> &str {
    match category {
        "Du lịch" => "travel",
        "Ẩm thực" => "food and dining",
        "Công việc" => "work and career",
        "Gia đình" => "family and relationships",
        "Học tập" => "study and education",
        "Y tế" => "health and medical",
        "Thể thao" => "sports and exercise",
        "Giải trí" => "entertainment and hobbies",
        "Mua sắm" => "shopping and commerce",
        "Giao thông" => "transportation and traffic",
        other => other,
    }
}

/// English name for a Vietnamese level label. Unknown labels pass through.
pub fn english_difficulty(difficulty: &str) -> &str {
    match difficulty {
        "Cơ bản" => "beginner",
        "Trung bình" => "intermediate",
        "Nâng cao" => "advanced",
        other => other,
    }
}

/// Build the generation prompt for `count` words.
pub fn vocabulary_prompt(category: &str, difficulty: &str, count: usize) -> String {
    let topic = english_category(category);
    let level = english_difficulty(difficulty);

    format!(
        r#"Generate {count} Korean vocabulary words about the topic "{category}" ({topic}) at the {difficulty} ({level}) level.

Requirements:
- Each word has: the Korean word (한글), its Vietnamese meaning, and a romanized pronunciation
- Common words that suit the {difficulty} level
- Directly related to the topic {category}

Return a JSON array in exactly this format:
[
  {{
    "korean": "밥",
    "vietnamese": "cơm",
    "pronunciation": "bap"
  }},
  {{
    "korean": "물",
    "vietnamese": "nước",
    "pronunciation": "mul"
  }}
]

Return ONLY the JSON array, no other text."#
    )
}

/// Short prompt used to check that the generator is reachable.
pub const CONNECTION_TEST_PROMPT: &str = "Say \"Hello\" in Korean with pronunciation";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_are_translated() {
        assert_eq!(english_category("Du lịch"), "travel");
        assert_eq!(english_difficulty("Nâng cao"), "advanced");
    }

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(english_category("space travel"), "space travel");
        assert_eq!(english_difficulty("expert"), "expert");
    }

    #[test]
    fn prompt_mentions_count_topic_and_level() {
        let prompt = vocabulary_prompt("Ẩm thực", "Cơ bản", 15);
        assert!(prompt.starts_with("Generate 15 Korean vocabulary words"));
        assert!(prompt.contains("\"Ẩm thực\" (food and dining)"));
        assert!(prompt.contains("Cơ bản (beginner)"));
        assert!(prompt.contains("\"korean\": \"밥\""));
    }
}
