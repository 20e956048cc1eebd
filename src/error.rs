// src/error.rs

use crate::models::Level;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog has {found} items, level {level} needs {needed}")]
    LevelOutOfRange {
        level: Level,
        found: usize,
        needed: usize,
    },

    #[error("Duplicate item id in catalog: {0}")]
    DuplicateId(u32),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CurriculumError {
    #[error("Curriculum is empty")]
    Empty,

    #[error("Curriculum day {found} found where day {expected} was expected")]
    DayGap { expected: u32, found: u32 },

    #[error("Curriculum introduces {scheduled} new items but the level only has {available}")]
    TooManyNewItems { scheduled: usize, available: usize },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Curriculum(#[from] CurriculumError),
}

impl From<rusqlite::Error> for SessionError {
    fn from(e: rusqlite::Error) -> Self {
        SessionError::Store(StoreError::Sqlite(e))
    }
}
