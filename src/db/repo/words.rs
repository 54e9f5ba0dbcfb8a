//! Word mutations. Each runs in one transaction and rolls back on any error.

use super::{link_categories, rebuild_kanji_index, RepoError, Repository};
use crate::domain::{Timestamp, WordDraft};
use sqlx::sqlite::SqliteConnection;
use sqlx::Row;
use tracing::info;

impl Repository {
    /// Insert a new word with its categories and kanji index.
    ///
    /// New words always start with `wrong_count = 0` and
    /// `created_at = updated_at = now`.
    ///
    /// # Errors
    /// `DuplicateWord` if (word, hiragana) is taken; nothing is written then.
    pub async fn add(&self, draft: &WordDraft) -> Result<i64, RepoError> {
        let now = Timestamp::now();
        let id = self.insert_new(draft, 0, now, now).await?;
        info!(word_id = id, word = %draft.word, hiragana = %draft.hiragana, "Word added");
        Ok(id)
    }

    /// Insert a word carried over from the legacy store, keeping its
    /// `wrong_count` and timestamps.
    pub async fn import_word(
        &self,
        draft: &WordDraft,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<i64, RepoError> {
        self.insert_new(draft, draft.wrong_count, created_at, updated_at)
            .await
    }

    async fn insert_new(
        &self,
        draft: &WordDraft,
        wrong_count: u32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<i64, RepoError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO words (word, hiragana, meaning, korean, wrong_count, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&draft.word)
        .bind(&draft.hiragana)
        .bind(&draft.meaning)
        .bind(&draft.korean)
        .bind(wrong_count)
        .bind(created_at.to_db_string())
        .bind(updated_at.to_db_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::from_write(e, draft))?;

        let word_id = result.last_insert_rowid();
        link_categories(&mut *tx, word_id, &draft.categories).await?;
        rebuild_kanji_index(&mut *tx, word_id, &draft.word).await?;

        tx.commit().await?;
        Ok(word_id)
    }

    /// Fully replace the word `id`: fields, categories and kanji index.
    ///
    /// `created_at` is kept, `updated_at` is set to now.
    ///
    /// # Errors
    /// `NotFound` if `id` does not exist, `DuplicateWord` if the new
    /// (word, hiragana) belongs to another row. The store is unchanged on error.
    pub async fn update(&self, id: i64, draft: &WordDraft) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await?;

        if !word_exists(&mut *tx, id).await? {
            return Err(RepoError::NotFound(id));
        }

        sqlx::query(
            r#"
            UPDATE words
            SET word = ?, hiragana = ?, meaning = ?, korean = ?, wrong_count = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.word)
        .bind(&draft.hiragana)
        .bind(&draft.meaning)
        .bind(&draft.korean)
        .bind(draft.wrong_count)
        .bind(Timestamp::now().to_db_string())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::from_write(e, draft))?;

        sqlx::query("DELETE FROM word_categories WHERE word_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_categories(&mut *tx, id, &draft.categories).await?;
        rebuild_kanji_index(&mut *tx, id, &draft.word).await?;

        tx.commit().await?;
        info!(word_id = id, word = %draft.word, "Word updated");
        Ok(())
    }

    /// Delete the word `id`; its category links and kanji index entries go
    /// with it through `ON DELETE CASCADE`. Categories themselves are kept.
    ///
    /// Returns the deleted word's surface form.
    pub async fn delete(&self, id: i64) -> Result<String, RepoError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT word FROM words WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Err(RepoError::NotFound(id));
        };
        let surface: String = row.get("word");

        sqlx::query("DELETE FROM words WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(word_id = id, word = %surface, "Word deleted");
        Ok(surface)
    }
}

async fn word_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM words WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}
