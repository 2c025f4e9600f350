//! Shared error types for the services crate.

use thiserror::Error;

use lingo_core::model::{QuizResultError, SettingsError};
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressStore`.
///
/// Storage failures are not listed: reads fall back to defaults and writes
/// are logged, so only caller mistakes surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    InvalidQuizResult(#[from] QuizResultError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to export progress: {0}")]
    Export(#[from] serde_json::Error),
}

/// Errors emitted by quiz sessions and `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no quiz questions available")]
    Empty,
    #[error("quiz already completed")]
    Completed,
    #[error("quiz not finished: {answered} of {total} questions answered")]
    Unfinished { answered: usize, total: usize },
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
