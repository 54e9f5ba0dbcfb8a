pub mod categories;
pub mod health;
pub mod kanji;
pub mod words;

use crate::db::Repository;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // GET takes a kanji, PUT/DELETE a word id, on the same path segment.
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/kanji", get(kanji::list_kanji).post(words::add_word))
        .route(
            "/kanji/:target",
            get(kanji::get_words_by_kanji)
                .put(words::update_word)
                .delete(words::delete_word),
        )
        .route("/words_list", get(words::list_words))
        .route("/categories", get(categories::list_categories))
        .route("/category/:category", get(categories::get_words_by_category))
        .layer(cors)
        .with_state(state)
}
