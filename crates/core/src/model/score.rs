use serde::Serialize;
use thiserror::Error;

use crate::model::statistics::rounded_percent;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("quiz must contain at least one question")]
    NoQuestions,

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    TooManyCorrect { correct: u32, total: u32 },
}

/// Outcome of one finished quiz: how many answers were right out of how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    correct: u32,
    total: u32,
}

impl QuizResult {
    /// Creates a validated quiz result.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError::NoQuestions` if `total` is 0 and
    /// `QuizResultError::TooManyCorrect` if `correct > total`.
    pub fn new(correct: u32, total: u32) -> Result<Self, QuizResultError> {
        if total == 0 {
            return Err(QuizResultError::NoQuestions);
        }
        if correct > total {
            return Err(QuizResultError::TooManyCorrect { correct, total });
        }
        Ok(Self { correct, total })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Score in percent, always within `0..=100`.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        rounded_percent(self.correct, self.total)
    }

    #[must_use]
    pub fn performance(&self) -> PerformanceLevel {
        PerformanceLevel::from_percentage(self.percentage())
    }
}

/// Banding used on the quiz result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceLevel {
    Excellent,
    Great,
    Good,
    Fair,
    KeepPracticing,
}

impl PerformanceLevel {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Excellent,
            75..=89 => Self::Great,
            60..=74 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::KeepPracticing,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Great => "Great",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::KeepPracticing => "Keep Practicing",
        }
    }
}
