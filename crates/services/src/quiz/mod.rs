mod service;
mod session;

pub use crate::error::QuizError;
pub use service::{FinishedQuiz, QuizService};
pub use session::{AnswerResult, QuizProgress, QuizSession};
