use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::language::{LANGUAGE_CATALOG, LanguageActivity, LanguageCode, LanguageRecord};
use crate::model::progress::UserProgress;
use crate::model::statistics::rounded_percent;

const RECENT_LIMIT: usize = 5;

/// A recently studied language, newest first in `LearningStats::recent_languages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentLanguage {
    pub code: LanguageCode,
    pub activity: LanguageActivity,
    pub best_score: u32,
    pub last_studied: DateTime<Utc>,
    pub course_progress: u32,
}

impl RecentLanguage {
    fn from_record(code: &LanguageCode, record: &LanguageRecord) -> Self {
        Self {
            code: code.clone(),
            activity: record.activity(),
            best_score: record.best_score,
            last_studied: record.last_studied,
            course_progress: record.course_progress(),
        }
    }
}

/// Read-only dashboard view derived from a `UserProgress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub total_languages: u32,
    pub languages_started: u32,
    pub languages_completed: u32,
    /// Percentage of tracked languages that are completed, within `0..=100`.
    pub completion_rate: u32,
    pub average_score: u32,
    pub total_quizzes: u32,
    pub total_flashcards: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub recent_languages: Vec<RecentLanguage>,
}

impl LearningStats {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        let stats = &progress.statistics;

        // Rate is taken from the language records themselves so it cannot
        // exceed 100% when the counters drift from the map.
        let tracked = u32::try_from(progress.languages.len()).unwrap_or(u32::MAX);
        let completed = progress.languages.values().filter(|r| r.completed).count();
        let completed = u32::try_from(completed).unwrap_or(u32::MAX);

        let mut recent: Vec<(&LanguageCode, &LanguageRecord)> = progress.languages.iter().collect();
        recent.sort_by(|(a_code, a), (b_code, b)| {
            b.last_studied
                .cmp(&a.last_studied)
                .then_with(|| a_code.cmp(b_code))
        });
        let recent_languages = recent
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|(code, record)| RecentLanguage::from_record(code, record))
            .collect();

        Self {
            total_languages: u32::try_from(LANGUAGE_CATALOG.len()).unwrap_or(u32::MAX),
            languages_started: stats.languages_started,
            languages_completed: stats.languages_completed,
            completion_rate: rounded_percent(completed, tracked).min(100),
            average_score: stats.average_quiz_score,
            total_quizzes: stats.total_quizzes_taken,
            total_flashcards: stats.total_flashcards_studied,
            current_streak: progress.profile.current_streak,
            longest_streak: progress.profile.longest_streak,
            recent_languages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::score::QuizResult;
    use crate::time::{CalendarZone, fixed_now};
    use chrono::Duration;

    fn code(raw: &str) -> LanguageCode {
        LanguageCode::new(raw).unwrap()
    }

    #[test]
    fn empty_progress_has_zero_rates() {
        let stats = LearningStats::from_progress(&UserProgress::new(fixed_now()));
        assert_eq!(stats.total_languages, 14);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.average_score, 0);
        assert!(stats.recent_languages.is_empty());
    }

    #[test]
    fn recent_languages_are_newest_first_and_capped() {
        let zone = CalendarZone::utc();
        let mut progress = UserProgress::new(fixed_now());
        let codes = ["hindi", "tamil", "urdu", "odia", "nepali", "telugu", "bengali"];
        for (i, raw) in codes.iter().enumerate() {
            let at = fixed_now() + Duration::minutes(i64::try_from(i).unwrap());
            progress.apply_flashcard_session(&code(raw), 1, at, zone);
        }

        let stats = LearningStats::from_progress(&progress);
        let recent: Vec<&str> = stats
            .recent_languages
            .iter()
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(recent, ["bengali", "telugu", "nepali", "odia", "urdu"]);
    }

    #[test]
    fn completion_rate_uses_tracked_languages() {
        let zone = CalendarZone::utc();
        let mut progress = UserProgress::new(fixed_now());
        progress.apply_quiz_result(&code("hindi"), QuizResult::new(9, 10).unwrap(), fixed_now(), zone);
        progress.apply_quiz_result(&code("tamil"), QuizResult::new(2, 10).unwrap(), fixed_now(), zone);
        progress.apply_flashcard_session(&code("urdu"), 4, fixed_now(), zone);

        let stats = LearningStats::from_progress(&progress);
        assert_eq!(stats.languages_started, 3);
        assert_eq!(stats.languages_completed, 1);
        assert_eq!(stats.completion_rate, 33);
        assert_eq!(stats.average_score, 55);
        assert_eq!(stats.total_quizzes, 2);
        assert_eq!(stats.total_flashcards, 4);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn completion_rate_ignores_drifted_counters() {
        let zone = CalendarZone::utc();
        let mut progress = UserProgress::new(fixed_now());
        progress.apply_quiz_result(&code("hindi"), QuizResult::new(10, 10).unwrap(), fixed_now(), zone);
        progress.statistics.languages_started = 0;

        let stats = LearningStats::from_progress(&progress);
        assert_eq!(stats.completion_rate, 100);
    }
}
