use serde::{Deserialize, Serialize};

/// Aggregate counters across all languages.
///
/// Field names on disk keep the `total*` prefixes of the stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    #[serde(rename = "totalLanguagesStarted")]
    pub languages_started: u32,
    #[serde(rename = "totalLanguagesCompleted")]
    pub languages_completed: u32,
    #[serde(rename = "totalQuizzesTaken")]
    pub total_quizzes_taken: u32,
    pub total_flashcards_studied: u32,
    pub average_quiz_score: u32,
    pub total_correct_answers: u32,
    pub total_questions: u32,
}

impl Statistics {
    /// Recompute `average_quiz_score` from the running totals.
    ///
    /// Zero questions yields an average of 0.
    pub fn refresh_average(&mut self) {
        self.average_quiz_score = rounded_percent(self.total_correct_answers, self.total_questions);
    }
}

/// `round(part / whole * 100)` with halves rounded up; 0 when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = u64::from(part) * 200 + u64::from(whole);
    let pct = scaled / (2 * u64::from(whole));
    u32::try_from(pct).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_percent_rounds_half_up() {
        assert_eq!(rounded_percent(1, 8), 13); // 12.5
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(8, 10), 80);
        assert_eq!(rounded_percent(0, 0), 0);
    }

    #[test]
    fn refresh_average_uses_totals() {
        let mut stats = Statistics {
            total_correct_answers: 17,
            total_questions: 25,
            ..Statistics::default()
        };
        stats.refresh_average();
        assert_eq!(stats.average_quiz_score, 68);
    }

    #[test]
    fn serializes_with_stored_key_names() {
        let json = serde_json::to_value(Statistics::default()).unwrap();
        assert!(json.get("totalLanguagesStarted").is_some());
        assert!(json.get("totalLanguagesCompleted").is_some());
        assert!(json.get("totalQuizzesTaken").is_some());
        assert!(json.get("totalFlashcardsStudied").is_some());
        assert!(json.get("averageQuizScore").is_some());
    }
}
