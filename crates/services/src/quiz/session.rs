use lingo_core::model::{LanguageCode, QuizResult};
use lingo_core::quiz::Question;

use crate::error::QuizError;

/// Outcome of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub is_correct: bool,
    /// The answer that would have been correct.
    pub expected: String,
    pub is_complete: bool,
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz over a fixed list of questions, answered in order.
#[derive(Debug, Clone)]
pub struct QuizSession {
    language: LanguageCode,
    questions: Vec<Question>,
    current: usize,
    correct: usize,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if `questions` is empty.
    pub fn new(language: LanguageCode, questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        Ok(Self {
            language,
            questions,
            current: 0,
            correct: 0,
        })
    }

    #[must_use]
    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question awaiting an answer, or `None` once complete.
    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn correct_answers(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Grade `choice` against the current question and move on.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if every question is already answered.
    pub fn answer_current(&mut self, choice: &str) -> Result<AnswerResult, QuizError> {
        let question = self.current().ok_or(QuizError::Completed)?;
        let is_correct = question.is_correct(choice);
        let expected = question.answer().to_owned();

        if is_correct {
            self.correct += 1;
        }
        self.current += 1;

        Ok(AnswerResult {
            is_correct,
            expected,
            is_complete: self.is_complete(),
        })
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.questions.len();
        let answered = self.current.min(total);
        QuizProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: answered == total,
        }
    }

    /// Final score of a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Unfinished` while questions remain.
    pub fn result(&self) -> Result<QuizResult, QuizError> {
        let progress = self.progress();
        if !progress.is_complete {
            return Err(QuizError::Unfinished {
                answered: progress.answered,
                total: progress.total,
            });
        }
        let correct = u32::try_from(self.correct).unwrap_or(u32::MAX);
        let total = u32::try_from(progress.total).unwrap_or(u32::MAX);
        QuizResult::new(correct, total).map_err(|e| QuizError::Progress(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::model::VocabEntry;
    use lingo_core::quiz::QuizGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(words: usize) -> QuizSession {
        let entries: Vec<VocabEntry> = (0..words)
            .map(|i| VocabEntry::new(format!("w{i}"), format!("m{i}"), format!("p{i}")).unwrap())
            .collect();
        let questions = QuizGenerator::default()
            .with_limits(words, 0)
            .generate(&entries, &mut StdRng::seed_from_u64(1));
        QuizSession::new(LanguageCode::new("tamil").unwrap(), questions).unwrap()
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let err = QuizSession::new(LanguageCode::new("tamil").unwrap(), Vec::new()).unwrap_err();
        assert!(matches!(err, QuizError::Empty));
    }

    #[test]
    fn answers_are_graded_in_order() {
        let mut quiz = session(3);

        let answer = quiz.current().unwrap().answer().to_owned();
        let first = quiz.answer_current(&answer).unwrap();
        assert!(first.is_correct);
        assert!(!first.is_complete);

        let second = quiz.answer_current("nope").unwrap();
        assert!(!second.is_correct);
        assert_eq!(second.expected, quiz.questions()[1].answer());

        assert!(matches!(
            quiz.result(),
            Err(QuizError::Unfinished {
                answered: 2,
                total: 3
            })
        ));

        let answer = quiz.current().unwrap().answer().to_owned();
        assert!(quiz.answer_current(&answer).unwrap().is_complete);
        assert!(quiz.current().is_none());

        let result = quiz.result().unwrap();
        assert_eq!((result.correct(), result.total()), (2, 3));
        assert_eq!(result.percentage(), 67);
    }

    #[test]
    fn answering_after_completion_fails() {
        let mut quiz = session(1);
        quiz.answer_current("x").unwrap();
        assert!(matches!(quiz.answer_current("x"), Err(QuizError::Completed)));
        assert_eq!(
            quiz.progress(),
            QuizProgress {
                total: 1,
                answered: 1,
                remaining: 0,
                is_complete: true
            }
        );
    }
}
