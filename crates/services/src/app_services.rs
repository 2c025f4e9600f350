use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::config::ProgressConfig;
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;
use crate::quiz::QuizService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressStore>,
    quizzes: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: &ProgressConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, config))
    }

    /// Build services over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock, config: &ProgressConfig) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, config)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, config: &ProgressConfig) -> Self {
        let progress = Arc::new(ProgressStore::with_config(
            clock,
            Arc::clone(&storage.kv),
            config,
        ));
        let quizzes = Arc::new(QuizService::new(Arc::clone(&progress)));
        Self { progress, quizzes }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }
}
