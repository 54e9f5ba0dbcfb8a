use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{CategoryInput, Word, WordDraft};
use crate::error::AppError;

/// Body of `POST /kanji` and `PUT /kanji/{word_id}`.
#[derive(Debug, Deserialize)]
pub struct WordPayload {
    pub word: String,
    pub hiragana: String,
    pub meaning: String,
    pub korean: String,
    #[serde(default)]
    pub category: Option<CategoryInput>,
    /// Only honored on update; new words start at 0.
    #[serde(default)]
    pub wrong_count: Option<u32>,
}

impl WordPayload {
    fn into_draft(self) -> Result<WordDraft, AppError> {
        if self.word.trim().is_empty() {
            return Err(AppError::BadRequest("word must not be blank".into()));
        }
        if self.hiragana.trim().is_empty() {
            return Err(AppError::BadRequest("hiragana must not be blank".into()));
        }

        Ok(WordDraft {
            word: self.word,
            hiragana: self.hiragana,
            meaning: self.meaning,
            korean: self.korean,
            wrong_count: self.wrong_count.unwrap_or(0),
            categories: self.category.unwrap_or_default().into_names(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationResponse {
    fn success(id: Option<i64>, message: Option<String>) -> Self {
        MutationResponse {
            status: "success",
            id,
            message,
        }
    }
}

pub async fn list_words(State(state): State<AppState>) -> Result<Json<Vec<Word>>, AppError> {
    Ok(Json(state.repo.list_all().await?))
}

pub async fn add_word(
    State(state): State<AppState>,
    Json(payload): Json<WordPayload>,
) -> Result<Json<MutationResponse>, AppError> {
    let draft = payload.into_draft()?;
    let id = state.repo.add(&draft).await?;
    Ok(Json(MutationResponse::success(Some(id), None)))
}

pub async fn update_word(
    Path(word_id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<WordPayload>,
) -> Result<Json<MutationResponse>, AppError> {
    let draft = payload.into_draft()?;
    state.repo.update(word_id, &draft).await?;
    Ok(Json(MutationResponse::success(
        Some(word_id),
        Some(format!("'{}' 단어 정보가 수정되었습니다.", draft.word)),
    )))
}

pub async fn delete_word(
    Path(word_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<MutationResponse>, AppError> {
    let surface = state.repo.delete(word_id).await?;
    Ok(Json(MutationResponse::success(
        Some(word_id),
        Some(format!("'{}' 단어가 삭제되었습니다.", surface)),
    )))
}
