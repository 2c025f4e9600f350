mod language;
mod profile;
mod progress;
mod score;
mod settings;
mod statistics;
mod stats;
mod vocab;

pub use language::{
    COMPLETION_THRESHOLD, CatalogLanguage, LANGUAGE_CATALOG, LanguageActivity, LanguageCode,
    LanguageCodeError, LanguageRecord, catalog_entry,
};
pub use profile::{AVATAR_OPTIONS, DEFAULT_AVATAR, DEFAULT_NAME, Profile, ProfileUpdate};
pub use progress::{QuizOutcome, UserProgress};
pub use score::{PerformanceLevel, QuizResult, QuizResultError};
pub use settings::{LearningSettings, SettingsError, SettingsUpdate};
pub use statistics::{Statistics, rounded_percent};
pub use stats::{LearningStats, RecentLanguage};
pub use vocab::{VocabEntry, VocabError};
