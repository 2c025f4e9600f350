#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod progress_store;
pub mod quiz;

pub use lingo_core::Clock;

pub use app_services::AppServices;
pub use config::ProgressConfig;
pub use error::{AppServicesError, ProgressError, QuizError};
pub use progress_store::ProgressStore;
pub use quiz::{AnswerResult, FinishedQuiz, QuizProgress, QuizService, QuizSession};
