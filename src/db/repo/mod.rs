//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct, the only code that touches
//! the words, categories, word_categories and word_kanji tables.
//! Methods are organized across submodules:
//! - `words.rs` - add, update and delete, each in a single transaction
//! - `lookup.rs` - read-only listings and lookups
//!
//! Shared category and kanji index maintenance lives here.

mod lookup;
mod words;

use crate::domain::{index_entries, Timestamp, Word, WordDraft};
use sqlx::sqlite::{Sqlite, SqliteConnection, SqlitePool, SqliteRow};
use sqlx::{QueryBuilder, Row};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// Ids per `IN (...)` list when resolving categories, well below SQLite's
/// bound-parameter limit.
const CATEGORY_LOOKUP_CHUNK: usize = 500;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("word already exists: {word} ({hiragana})")]
    DuplicateWord { word: String, hiragana: String },
    #[error("word not found: {0}")]
    NotFound(i64),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl RepoError {
    /// Convert a uniqueness violation on (word, hiragana) into `DuplicateWord`.
    /// Every other storage error passes through untouched.
    fn from_write(err: sqlx::Error, draft: &WordDraft) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::DuplicateWord {
                    word: draft.word.clone(),
                    hiragana: draft.hiragana.clone(),
                }
            }
            _ => RepoError::Storage(err),
        }
    }
}

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Check that the store answers queries.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Link `word_id` to each named category, creating categories on first use.
///
/// Idempotent per (word, category) pair; `position` records submission order.
async fn link_categories(
    conn: &mut SqliteConnection,
    word_id: i64,
    names: &[String],
) -> Result<(), sqlx::Error> {
    for (position, name) in names.iter().enumerate() {
        sqlx::query("INSERT INTO categories (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(&mut *conn)
            .await?;

        let category_id: i64 = sqlx::query("SELECT id FROM categories WHERE name = ?")
            .bind(name)
            .fetch_one(&mut *conn)
            .await?
            .get("id");

        sqlx::query(
            r#"
            INSERT OR IGNORE INTO word_categories (word_id, category_id, position)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(word_id)
        .bind(category_id)
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Recompute the kanji index of `word_id` from its surface form.
async fn rebuild_kanji_index(
    conn: &mut SqliteConnection,
    word_id: i64,
    surface: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM word_kanji WHERE word_id = ?")
        .bind(word_id)
        .execute(&mut *conn)
        .await?;

    for kanji in index_entries(surface) {
        sqlx::query("INSERT OR IGNORE INTO word_kanji (word_id, kanji) VALUES (?, ?)")
            .bind(word_id)
            .bind(kanji.to_string())
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Map `words` rows to `Word`s and attach their category names.
async fn resolve_words(
    conn: &mut SqliteConnection,
    rows: Vec<SqliteRow>,
) -> Result<Vec<Word>, sqlx::Error> {
    let mut words: Vec<Word> = rows.iter().map(word_from_row).collect();
    let ids: Vec<i64> = words.iter().map(|w| w.id).collect();
    let mut categories = load_categories(conn, &ids).await?;

    for word in &mut words {
        word.categories = categories.remove(&word.id).unwrap_or_default();
    }
    Ok(words)
}

async fn load_categories(
    conn: &mut SqliteConnection,
    word_ids: &[i64],
) -> Result<HashMap<i64, Vec<String>>, sqlx::Error> {
    let mut by_word: HashMap<i64, Vec<String>> = HashMap::new();

    for chunk in word_ids.chunks(CATEGORY_LOOKUP_CHUNK) {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT wc.word_id, c.name FROM word_categories wc \
             JOIN categories c ON c.id = wc.category_id \
             WHERE wc.word_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in chunk {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY wc.word_id, wc.position");

        let rows = builder.build().fetch_all(&mut *conn).await?;
        for row in rows {
            let word_id: i64 = row.get("word_id");
            let name: String = row.get("name");
            by_word.entry(word_id).or_default().push(name);
        }
    }

    Ok(by_word)
}

fn word_from_row(row: &SqliteRow) -> Word {
    let id: i64 = row.get("id");
    let wrong_count: i64 = row.get("wrong_count");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Word {
        id,
        word: row.get("word"),
        hiragana: row.get("hiragana"),
        meaning: row.get("meaning"),
        korean: row.get("korean"),
        wrong_count: u32::try_from(wrong_count).unwrap_or_else(|_| {
            warn!(word_id = id, wrong_count, "Out-of-range wrong_count, using 0");
            0
        }),
        created_at: parse_stored_timestamp(id, "created_at", &created_at),
        updated_at: parse_stored_timestamp(id, "updated_at", &updated_at),
        categories: Vec::new(),
    }
}

fn parse_stored_timestamp(word_id: i64, column: &str, raw: &str) -> Timestamp {
    Timestamp::from_db_str(raw)
        .or_else(|| Timestamp::parse_lenient(raw))
        .unwrap_or_else(|| {
            warn!(word_id, column, value = %raw, "Failed to parse stored timestamp, using default");
            Timestamp::default()
        })
}
