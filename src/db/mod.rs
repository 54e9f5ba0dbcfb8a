//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and schema setup
//! - SQLite pragma configuration
//! - Repository layer for word, category and kanji index operations

pub mod migrations;
pub mod repo;

pub use migrations::{init_db, initialize};
pub use repo::{RepoError, Repository};
