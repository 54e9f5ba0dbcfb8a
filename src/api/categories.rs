use axum::extract::{Path, State};
use axum::Json;

use crate::api::AppState;
use crate::domain::Word;
use crate::error::AppError;

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.repo.list_categories().await?))
}

pub async fn get_words_by_category(
    Path(category): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Word>>, AppError> {
    Ok(Json(state.repo.find_by_category(&category).await?))
}
