use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::language::{COMPLETION_THRESHOLD, LanguageCode, LanguageRecord};
use crate::model::profile::{Profile, ProfileUpdate};
use crate::model::score::QuizResult;
use crate::model::settings::LearningSettings;
use crate::model::statistics::Statistics;
use crate::streak::{self, StreakChange};
use crate::time::CalendarZone;

/// Everything persisted about one learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub profile: Profile,
    pub languages: BTreeMap<LanguageCode, LanguageRecord>,
    pub statistics: Statistics,
    pub achievements: BTreeSet<String>,
    pub settings: LearningSettings,
}

/// What a recorded quiz changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    /// Score of this attempt in percent.
    pub score: u32,
    /// True only on the attempt that first completed the language.
    pub newly_completed: bool,
    pub streak: StreakChange,
}

impl UserProgress {
    /// Default record for a learner first seen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            profile: Profile::new(now),
            languages: BTreeMap::new(),
            statistics: Statistics::default(),
            achievements: BTreeSet::new(),
            settings: LearningSettings::default(),
        }
    }

    #[must_use]
    pub fn language(&self, code: &LanguageCode) -> Option<&LanguageRecord> {
        self.languages.get(code)
    }

    /// Fetch the record for `code`, creating it (and counting the language as
    /// started) on first encounter.
    fn language_entry(&mut self, code: &LanguageCode, now: DateTime<Utc>) -> &mut LanguageRecord {
        if !self.languages.contains_key(code) {
            self.statistics.languages_started = self.statistics.languages_started.saturating_add(1);
        }
        self.languages
            .entry(code.clone())
            .or_insert_with(|| LanguageRecord::started(now))
    }

    /// Apply a finished quiz for `code`.
    ///
    /// - `best_score` never decreases.
    /// - The language is completed (and counted) the first time a score of 80%
    ///   or more is reached.
    /// - Global counters and the average quiz score are refreshed, then the
    ///   streak is updated.
    pub fn apply_quiz_result(
        &mut self,
        code: &LanguageCode,
        result: QuizResult,
        now: DateTime<Utc>,
        zone: CalendarZone,
    ) -> QuizOutcome {
        let score = result.percentage();

        let record = self.language_entry(code, now);
        record.attempts = record.attempts.saturating_add(1);
        record.last_studied = now;
        record.total_questions = record.total_questions.saturating_add(result.total());
        record.correct_answers = record.correct_answers.saturating_add(result.correct());
        record.best_score = record.best_score.max(score);

        let newly_completed = score >= COMPLETION_THRESHOLD && !record.completed;
        if newly_completed {
            record.completed = true;
        }

        let stats = &mut self.statistics;
        if newly_completed {
            stats.languages_completed = stats.languages_completed.saturating_add(1);
        }
        stats.total_quizzes_taken = stats.total_quizzes_taken.saturating_add(1);
        stats.total_correct_answers = stats.total_correct_answers.saturating_add(result.correct());
        stats.total_questions = stats.total_questions.saturating_add(result.total());
        stats.refresh_average();

        let streak = streak::record_activity(&mut self.profile, now, zone);

        QuizOutcome {
            score,
            newly_completed,
            streak,
        }
    }

    /// Apply a finished flashcard session of `cards_studied` cards for `code`.
    pub fn apply_flashcard_session(
        &mut self,
        code: &LanguageCode,
        cards_studied: u32,
        now: DateTime<Utc>,
        zone: CalendarZone,
    ) -> StreakChange {
        self.language_entry(code, now).last_studied = now;
        self.statistics.total_flashcards_studied = self
            .statistics
            .total_flashcards_studied
            .saturating_add(cards_studied);

        streak::record_activity(&mut self.profile, now, zone)
    }

    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        self.profile.apply(update);
    }

    pub fn apply_settings(&mut self, settings: LearningSettings) {
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn hindi() -> LanguageCode {
        LanguageCode::new("hindi").unwrap()
    }

    fn quiz(correct: u32, total: u32) -> QuizResult {
        QuizResult::new(correct, total).unwrap()
    }

    #[test]
    fn eight_of_ten_completes_language() {
        let mut progress = UserProgress::new(fixed_now());
        let outcome =
            progress.apply_quiz_result(&hindi(), quiz(8, 10), fixed_now(), CalendarZone::utc());

        assert_eq!(outcome.score, 80);
        assert!(outcome.newly_completed);
        let record = progress.language(&hindi()).unwrap();
        assert_eq!(record.best_score, 80);
        assert!(record.completed);
        assert_eq!(record.attempts, 1);
        assert_eq!(progress.statistics.languages_started, 1);
        assert_eq!(progress.statistics.languages_completed, 1);
        assert_eq!(progress.statistics.average_quiz_score, 80);
        assert_eq!(progress.profile.current_streak, 1);
    }

    #[test]
    fn best_score_never_decreases() {
        let mut progress = UserProgress::new(fixed_now());
        let zone = CalendarZone::utc();
        progress.apply_quiz_result(&hindi(), quiz(7, 10), fixed_now(), zone);
        progress.apply_quiz_result(&hindi(), quiz(3, 10), fixed_now(), zone);

        let record = progress.language(&hindi()).unwrap();
        assert_eq!(record.best_score, 70);
        assert_eq!(record.attempts, 2);
        assert_eq!(record.correct_answers, 10);
        assert_eq!(record.total_questions, 20);
        assert_eq!(progress.statistics.average_quiz_score, 50);
    }

    #[test]
    fn completion_counted_once() {
        let mut progress = UserProgress::new(fixed_now());
        let zone = CalendarZone::utc();
        let first = progress.apply_quiz_result(&hindi(), quiz(9, 10), fixed_now(), zone);
        let second = progress.apply_quiz_result(&hindi(), quiz(10, 10), fixed_now(), zone);
        let third = progress.apply_quiz_result(&hindi(), quiz(1, 10), fixed_now(), zone);

        assert!(first.newly_completed);
        assert!(!second.newly_completed);
        assert!(!third.newly_completed);
        assert_eq!(progress.statistics.languages_completed, 1);
        assert!(progress.language(&hindi()).unwrap().completed);
    }

    #[test]
    fn flashcards_start_language_without_attempt() {
        let mut progress = UserProgress::new(fixed_now());
        let zone = CalendarZone::utc();
        progress.apply_flashcard_session(&hindi(), 12, fixed_now(), zone);

        let later = fixed_now() + Duration::hours(1);
        let change = progress.apply_flashcard_session(&hindi(), 3, later, zone);

        assert_eq!(change, StreakChange::Unchanged);
        let record = progress.language(&hindi()).unwrap();
        assert_eq!(record.attempts, 0);
        assert_eq!(record.last_studied, later);
        assert_eq!(progress.statistics.total_flashcards_studied, 15);
        assert_eq!(progress.statistics.languages_started, 1);
        assert_eq!(progress.profile.current_streak, 1);
    }

    #[test]
    fn serializes_with_camel_case_sections() {
        let mut progress = UserProgress::new(fixed_now());
        progress.apply_quiz_result(&hindi(), quiz(5, 10), fixed_now(), CalendarZone::utc());

        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["languages"]["hindi"]["bestScore"], 50);
        assert_eq!(json["profile"]["currentStreak"], 1);
        assert_eq!(json["statistics"]["totalQuizzesTaken"], 1);
        assert_eq!(json["settings"]["dailyGoal"], 10);
        assert!(json["achievements"].as_array().unwrap().is_empty());

        let back: UserProgress = serde_json::from_value(json).unwrap();
        assert_eq!(back, progress);
    }
}
