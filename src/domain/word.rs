//! Vocabulary word records.

use crate::domain::Timestamp;
use serde::{Deserialize, Serialize};

/// Category whose listing is ordered by recency instead of surface form.
pub const EXAMPLE_SENTENCE_CATEGORY: &str = "예문";

/// A stored word with its categories resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    /// Surface form, e.g. "先生".
    pub word: String,
    /// Reading in hiragana.
    pub hiragana: String,
    pub meaning: String,
    /// Korean gloss of the reading.
    pub korean: String,
    pub wrong_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Category names in the order they were submitted.
    #[serde(rename = "category")]
    pub categories: Vec<String>,
}

/// Field values for creating or fully replacing a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDraft {
    pub word: String,
    pub hiragana: String,
    pub meaning: String,
    pub korean: String,
    pub wrong_count: u32,
    /// Expected to be normalized already, see [`normalize_categories`].
    pub categories: Vec<String>,
}

impl WordDraft {
    pub fn new(word: &str, hiragana: &str, meaning: &str, korean: &str) -> Self {
        WordDraft {
            word: word.to_string(),
            hiragana: hiragana.to_string(),
            meaning: meaning.to_string(),
            korean: korean.to_string(),
            wrong_count: 0,
            categories: Vec::new(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.categories = normalize_categories(categories);
        self
    }

    pub fn with_wrong_count(mut self, wrong_count: u32) -> Self {
        self.wrong_count = wrong_count;
        self
    }
}

/// Category field as submitted by clients: absent, one name, or a list.
///
/// Non-string list items are dropped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CategoryInput {
    #[default]
    None,
    One(String),
    Many(Vec<serde_json::Value>),
}

impl CategoryInput {
    pub fn into_names(self) -> Vec<String> {
        match self {
            CategoryInput::None => Vec::new(),
            CategoryInput::One(name) => normalize_categories([name]),
            CategoryInput::Many(items) => normalize_categories(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string)),
            ),
        }
    }
}

/// Trim names, drop blanks, and collapse duplicates keeping first-seen order.
pub fn normalize_categories<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned: Vec<String> = Vec::new();
    for name in names {
        let trimmed = name.as_ref().trim();
        if !trimmed.is_empty() && !cleaned.iter().any(|c| c == trimmed) {
            cleaned.push(trimmed.to_string());
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_trims_and_dedupes_in_order() {
        let cleaned = normalize_categories([" 직업 ", "", "언론", "직업", "   ", "언론 "]);
        assert_eq!(cleaned, vec!["직업", "언론"]);
    }

    #[test]
    fn category_input_accepts_single_string() {
        let input: CategoryInput = serde_json::from_value(json!("  시간 ")).unwrap();
        assert_eq!(input.into_names(), vec!["시간"]);
    }

    #[test]
    fn category_input_skips_non_strings() {
        let input: CategoryInput = serde_json::from_value(json!(["방향", 3, null, "방향", "자연물"])).unwrap();
        assert_eq!(input.into_names(), vec!["방향", "자연물"]);
    }

    #[test]
    fn category_input_null_is_empty() {
        let input: Option<CategoryInput> = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(input.unwrap_or_default().into_names(), Vec::<String>::new());
    }

    #[test]
    fn word_serializes_categories_as_category() {
        let word = Word {
            id: 1,
            word: "先生".to_string(),
            hiragana: "せんせい".to_string(),
            meaning: "선생님".to_string(),
            korean: "센세이".to_string(),
            wrong_count: 0,
            created_at: Timestamp::default(),
            updated_at: Timestamp::default(),
            categories: vec!["직업".to_string()],
        };
        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(value["category"], json!(["직업"]));
        assert_eq!(value["wrong_count"], json!(0));
        assert!(value["created_at"].is_string());
    }
}
