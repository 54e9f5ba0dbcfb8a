//! Read-only listings and lookups.

use super::{resolve_words, Repository};
use crate::domain::{Word, EXAMPLE_SENTENCE_CATEGORY};
use sqlx::Row;
use tracing::debug;

const WORD_COLUMNS: &str =
    "w.id, w.word, w.hiragana, w.meaning, w.korean, w.wrong_count, w.created_at, w.updated_at";

impl Repository {
    /// Every word, most recently updated first.
    pub async fn list_all(&self) -> Result<Vec<Word>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(&format!(
            "SELECT {WORD_COLUMNS} FROM words w ORDER BY w.updated_at DESC, w.id DESC"
        ))
        .fetch_all(&mut *conn)
        .await?;

        resolve_words(&mut *conn, rows).await
    }

    /// Words whose kanji index contains `kanji`, ordered by surface form.
    pub async fn find_by_kanji(&self, kanji: &str) -> Result<Vec<Word>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(&format!(
            r#"
            SELECT {WORD_COLUMNS}
            FROM words w
            JOIN word_kanji wk ON wk.word_id = w.id
            WHERE wk.kanji = ?
            ORDER BY w.word ASC, w.hiragana ASC, w.id ASC
            "#
        ))
        .bind(kanji)
        .fetch_all(&mut *conn)
        .await?;

        debug!(kanji = %kanji, matches = rows.len(), "Kanji lookup");
        resolve_words(&mut *conn, rows).await
    }

    /// Words in the category `name`.
    ///
    /// Ordered by surface form, except for the example-sentence category
    /// which is ordered by `updated_at` descending. An unknown name yields an
    /// empty list.
    pub async fn find_by_category(&self, name: &str) -> Result<Vec<Word>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;

        let category_id: Option<i64> = sqlx::query("SELECT id FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?
            .map(|row| row.get("id"));
        let Some(category_id) = category_id else {
            debug!(category = %name, "Unknown category");
            return Ok(Vec::new());
        };

        let order_by = if name == EXAMPLE_SENTENCE_CATEGORY {
            "w.updated_at DESC, w.id DESC"
        } else {
            "w.word ASC, w.hiragana ASC, w.id ASC"
        };
        let rows = sqlx::query(&format!(
            r#"
            SELECT {WORD_COLUMNS}
            FROM words w
            JOIN word_categories wc ON wc.word_id = w.id
            WHERE wc.category_id = ?
            ORDER BY {order_by}
            "#
        ))
        .bind(category_id)
        .fetch_all(&mut *conn)
        .await?;

        debug!(category = %name, matches = rows.len(), "Category lookup");
        resolve_words(&mut *conn, rows).await
    }

    /// Single word by id.
    pub async fn get(&self, id: i64) -> Result<Option<Word>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query(&format!("SELECT {WORD_COLUMNS} FROM words w WHERE w.id = ?"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match row {
            Some(row) => Ok(resolve_words(&mut *conn, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Every distinct indexed kanji in code-point order.
    pub async fn list_kanji(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows = sqlx::query("SELECT DISTINCT kanji FROM word_kanji ORDER BY kanji ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("kanji")).collect())
    }

    /// Every category name, including ones no word uses any more.
    pub async fn list_categories(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows = sqlx::query("SELECT name FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("name")).collect())
    }

    /// Kanji index entries of one word, in code-point order.
    pub async fn kanji_of(&self, id: i64) -> Result<Vec<String>, sqlx::Error> {
        let rows = sqlx::query("SELECT kanji FROM word_kanji WHERE word_id = ? ORDER BY kanji ASC")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("kanji")).collect())
    }

    /// Number of stored words.
    pub async fn count_words(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM words")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}
