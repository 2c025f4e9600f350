use std::sync::Arc;

use rand::Rng;
use tracing::info;

use lingo_core::model::{LanguageCode, QuizResult, UserProgress, VocabEntry};
use lingo_core::quiz::QuizGenerator;

use super::session::QuizSession;
use crate::error::QuizError;
use crate::progress_store::ProgressStore;

/// A completed quiz and the progress record after it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedQuiz {
    pub result: QuizResult,
    pub progress: UserProgress,
}

/// Starts quizzes from vocabulary and records finished ones.
#[derive(Clone)]
pub struct QuizService {
    generator: QuizGenerator,
    progress: Arc<ProgressStore>,
}

impl QuizService {
    #[must_use]
    pub fn new(progress: Arc<ProgressStore>) -> Self {
        Self {
            generator: QuizGenerator::default(),
            progress,
        }
    }

    #[must_use]
    pub fn with_generator(mut self, generator: QuizGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Start a quiz using the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if `vocabulary` yields no questions.
    pub fn start_quiz(
        &self,
        language: LanguageCode,
        vocabulary: &[VocabEntry],
    ) -> Result<QuizSession, QuizError> {
        self.start_quiz_with_rng(language, vocabulary, &mut rand::rng())
    }

    /// Start a quiz with a caller-supplied RNG, e.g. a seeded one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if `vocabulary` yields no questions.
    pub fn start_quiz_with_rng<R: Rng + ?Sized>(
        &self,
        language: LanguageCode,
        vocabulary: &[VocabEntry],
        rng: &mut R,
    ) -> Result<QuizSession, QuizError> {
        let questions = self.generator.generate(vocabulary, rng);
        QuizSession::new(language, questions)
    }

    /// Store the score of a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Unfinished` if questions remain unanswered.
    pub async fn finish(&self, session: &QuizSession) -> Result<FinishedQuiz, QuizError> {
        let result = session.result()?;
        let progress = self
            .progress
            .record_quiz_result(session.language(), result.correct(), result.total())
            .await?;

        info!(
            language = %session.language(),
            score = result.percentage(),
            performance = result.performance().label(),
            "quiz finished"
        );
        Ok(FinishedQuiz { result, progress })
    }
}
