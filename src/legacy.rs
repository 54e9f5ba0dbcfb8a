//! One-shot import of the legacy per-kanji JSON store.
//!
//! The legacy file maps each kanji to the entries filed under it, so a word
//! with several kanji appears several times. Entries are deduplicated by
//! (word, hiragana) keeping the first one seen in file order; any stored
//! `kanji_list` is ignored and the index is rebuilt from the surface form.
//!
//! Buckets are kept in file order (serde_json `preserve_order`) because the
//! legacy editor only rewrote the first bucket holding a word, so later
//! copies can be stale.

use crate::db::{RepoError, Repository};
use crate::domain::{CategoryInput, Timestamp, WordDraft};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Entries filed under one kanji, still undecoded so a bad entry only
/// costs itself.
#[derive(Debug, Clone)]
pub struct LegacyBucket {
    pub kanji: String,
    pub entries: Vec<Value>,
}

/// Parsed legacy file, buckets in file order.
pub type LegacyIndex = Vec<LegacyBucket>;

#[derive(Debug, Error)]
pub enum LegacyError {
    #[error("failed to read legacy file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse legacy file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub hiragana: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub korean: String,
    #[serde(default)]
    pub category: Option<CategoryInput>,
    #[serde(default)]
    pub wrong_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl LegacyEntry {
    fn to_draft(&self) -> WordDraft {
        WordDraft {
            word: self.word.clone(),
            hiragana: self.hiragana.clone(),
            meaning: self.meaning.clone(),
            korean: self.korean.clone(),
            wrong_count: self.wrong_count.unwrap_or(0),
            categories: self.category.clone().unwrap_or_default().into_names(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Words written to the store.
    pub migrated: usize,
    /// Repeats within the file plus words the store already had.
    pub duplicates: usize,
    /// Entries skipped because they were unusable or the insert failed.
    pub failed: usize,
}

/// Read the legacy file. Only an unreadable file or a document that is not a
/// JSON object fails here; individual entries are checked during import.
pub fn load_legacy_index(path: impl AsRef<Path>) -> Result<LegacyIndex, LegacyError> {
    let content = std::fs::read_to_string(path)?;
    let buckets: Map<String, Value> = serde_json::from_str(&content)?;

    Ok(buckets
        .into_iter()
        .map(|(kanji, value)| LegacyBucket {
            kanji,
            entries: match value {
                Value::Array(items) => items,
                other => vec![other],
            },
        })
        .collect())
}

/// Import every distinct word of `index` into `repo`.
///
/// Per-word failures are logged and counted; only failures to reach the
/// store at all abort the run.
pub async fn import_index(
    repo: &Repository,
    index: &LegacyIndex,
) -> Result<MigrationReport, LegacyError> {
    repo.ping().await?;

    let import_time = Timestamp::now();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut report = MigrationReport::default();

    for bucket in index {
        let kanji = &bucket.kanji;
        for raw in &bucket.entries {
            let entry = match LegacyEntry::deserialize(raw) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(kanji = %kanji, error = %e, "Skipping malformed legacy entry");
                    report.failed += 1;
                    continue;
                }
            };

            if !seen.insert((entry.word.clone(), entry.hiragana.clone())) {
                report.duplicates += 1;
                continue;
            }

            if entry.word.trim().is_empty() || entry.hiragana.trim().is_empty() {
                warn!(kanji = %kanji, word = %entry.word, "Skipping legacy entry without word or reading");
                report.failed += 1;
                continue;
            }

            let created_at = parse_or(entry.created_at.as_deref(), import_time);
            let updated_at = parse_or(entry.updated_at.as_deref(), created_at);

            match repo
                .import_word(&entry.to_draft(), created_at, updated_at)
                .await
            {
                Ok(_) => report.migrated += 1,
                Err(RepoError::DuplicateWord { .. }) => report.duplicates += 1,
                Err(e) => {
                    warn!(word = %entry.word, hiragana = %entry.hiragana, error = %e, "Failed to import legacy word");
                    report.failed += 1;
                }
            }
        }
    }

    info!(
        migrated = report.migrated,
        duplicates = report.duplicates,
        failed = report.failed,
        "Legacy import finished"
    );
    Ok(report)
}

fn parse_or(raw: Option<&str>, fallback: Timestamp) -> Timestamp {
    raw.and_then(Timestamp::parse_lenient).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_tolerates_missing_optional_fields() {
        let entry: LegacyEntry = serde_json::from_value(json!({
            "word": "行動",
            "hiragana": "こうどう",
            "meaning": "행동",
            "korean": "코도",
            "kanji_list": ["行", "動"]
        }))
        .unwrap();
        let draft = entry.to_draft();
        assert_eq!(draft.wrong_count, 0);
        assert!(draft.categories.is_empty());
    }

    #[test]
    fn entry_categories_are_normalized() {
        let entry: LegacyEntry = serde_json::from_value(json!({
            "word": "東",
            "hiragana": "ひがし",
            "meaning": "동쪽",
            "korean": "히가시",
            "category": ["방향 ", "방향", ""]
        }))
        .unwrap();
        assert_eq!(entry.to_draft().categories, vec!["방향"]);
    }

    #[test]
    fn entry_with_wrong_types_is_rejected() {
        for bad in [
            json!({"word": null, "hiragana": "いく"}),
            json!({"word": "行く", "hiragana": "いく", "wrong_count": -1}),
            json!({"word": "行く", "hiragana": "いく", "category": 5}),
            json!("行く"),
        ] {
            assert!(LegacyEntry::deserialize(&bad).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn parse_or_falls_back() {
        let fallback = Timestamp::default();
        assert_eq!(parse_or(None, fallback), fallback);
        assert_eq!(parse_or(Some("garbage"), fallback), fallback);
        assert_ne!(parse_or(Some("2025-10-10 12:00:00+00:00"), fallback), fallback);
    }
}
