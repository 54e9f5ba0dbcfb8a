pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod legacy;

pub use config::Config;
pub use db::{init_db, RepoError, Repository};
pub use domain::{extract_kanji, Timestamp, Word, WordDraft};
pub use error::AppError;
