//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use reading_core::model::ContentError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuizService`.
///
/// The in-memory session keeps the mutation even when the snapshot write
/// fails; only persistence can go wrong.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("failed to persist session snapshot: {0}")]
    Persist(#[from] StorageError),
}

/// Errors emitted while loading quiz content from a file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentLoadError {
    #[error("cannot read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
