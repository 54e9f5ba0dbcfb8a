use axum::extract::{Path, State};
use axum::Json;

use crate::api::AppState;
use crate::domain::Word;
use crate::error::AppError;

pub async fn list_kanji(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.repo.list_kanji().await?))
}

/// Words containing one kanji. No match is an empty list, not a 404.
pub async fn get_words_by_kanji(
    Path(kanji): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Word>>, AppError> {
    Ok(Json(state.repo.find_by_kanji(&kanji).await?))
}
