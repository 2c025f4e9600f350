use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use lingo_core::model::{
    LanguageCode, LearningStats, ProfileUpdate, QuizResult, SettingsUpdate, UserProgress,
};
use lingo_core::time::{CalendarZone, Clock};
use storage::progress::{decode_progress, encode_progress};
use storage::repository::KeyValueStore;

use crate::config::ProgressConfig;
use crate::error::ProgressError;

/// Single owner of a learner's persisted progress.
///
/// Every mutation is a load-modify-save cycle run under one async mutex, so
/// concurrent callers never interleave partial updates. Storage failures
/// never reach the caller: unreadable documents fall back to defaults and
/// failed writes are logged while the in-memory result is still returned.
pub struct ProgressStore {
    clock: Clock,
    zone: CalendarZone,
    key: String,
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressExport<'a> {
    user_progress: &'a UserProgress,
    export_date: DateTime<Utc>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(clock, kv, &ProgressConfig::default())
    }

    #[must_use]
    pub fn with_config(
        clock: Clock,
        kv: Arc<dyn KeyValueStore>,
        config: &ProgressConfig,
    ) -> Self {
        Self {
            clock,
            zone: config.calendar_zone,
            key: config.storage_key.clone(),
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// Current progress, merged over defaults. Never fails.
    pub async fn load(&self) -> UserProgress {
        self.read(self.clock.now()).await
    }

    /// Record a finished quiz of `correct` right answers out of `total`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidQuizResult` if `total` is 0 or
    /// `correct > total`; nothing is stored in that case.
    pub async fn record_quiz_result(
        &self,
        language: &LanguageCode,
        correct: u32,
        total: u32,
    ) -> Result<UserProgress, ProgressError> {
        let result = QuizResult::new(correct, total)?;
        let zone = self.zone;

        let (progress, outcome) = self
            .mutate(|progress, now| progress.apply_quiz_result(language, result, now, zone))
            .await;

        debug!(%language, correct, total, score = outcome.score, "recorded quiz result");
        if outcome.newly_completed {
            info!(%language, score = outcome.score, "language completed");
        }
        Ok(progress)
    }

    /// Record a finished flashcard session of `cards_studied` cards.
    pub async fn record_flashcard_session(
        &self,
        language: &LanguageCode,
        cards_studied: u32,
    ) -> UserProgress {
        let zone = self.zone;
        let (progress, streak) = self
            .mutate(|progress, now| {
                progress.apply_flashcard_session(language, cards_studied, now, zone)
            })
            .await;

        debug!(%language, cards_studied, ?streak, "recorded flashcard session");
        progress
    }

    /// Merge the supplied profile fields.
    pub async fn update_profile(&self, update: ProfileUpdate) -> UserProgress {
        let (progress, ()) = self
            .mutate(|progress, _| progress.apply_profile_update(update))
            .await;
        progress
    }

    /// Validate and apply a settings edit.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Settings` if validation fails; nothing is stored.
    pub async fn update_settings(
        &self,
        update: SettingsUpdate,
    ) -> Result<UserProgress, ProgressError> {
        let _guard = self.write_lock.lock().await;
        let mut progress = self.read(self.clock.now()).await;
        let settings = update.validate(&progress.settings)?;
        progress.apply_settings(settings);
        self.persist(&progress).await;
        Ok(progress)
    }

    /// Discard the stored record and return fresh defaults.
    pub async fn reset(&self) -> UserProgress {
        let _guard = self.write_lock.lock().await;
        if let Err(err) = self.kv.remove(&self.key).await {
            warn!(key = %self.key, error = %err, "failed to remove stored progress");
        }
        info!(key = %self.key, "progress reset");
        UserProgress::new(self.clock.now())
    }

    /// Dashboard statistics derived from the current record.
    pub async fn compute_statistics(&self) -> LearningStats {
        LearningStats::from_progress(&self.load().await)
    }

    /// Pretty JSON export of the current record with an export timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Export` if serialization fails.
    pub async fn export_json(&self) -> Result<String, ProgressError> {
        let now = self.clock.now();
        let progress = self.read(now).await;
        let export = ProgressExport {
            user_progress: &progress,
            export_date: now,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    async fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut UserProgress, DateTime<Utc>) -> T,
    ) -> (UserProgress, T) {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();
        let mut progress = self.read(now).await;
        let out = apply(&mut progress, now);
        self.persist(&progress).await;
        (progress, out)
    }

    async fn read(&self, now: DateTime<Utc>) -> UserProgress {
        let defaults = UserProgress::new(now);
        let raw = match self.kv.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return defaults,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read progress, using defaults");
                return defaults;
            }
        };

        decode_progress(&raw, &defaults).unwrap_or_else(|err| {
            warn!(key = %self.key, error = %err, "stored progress is unreadable, using defaults");
            defaults
        })
    }

    /// Write failures are logged and otherwise ignored.
    async fn persist(&self, progress: &UserProgress) {
        let result = match encode_progress(progress) {
            Ok(raw) => self.kv.set(&self.key, &raw).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            warn!(key = %self.key, error = %err, "failed to save progress");
        }
    }
}
