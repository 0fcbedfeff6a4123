#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod history;
pub mod quiz;

pub use storage::repository::VocabularyStats;
pub use vocab_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, HistoryError, QuizServiceError};
pub use history::{AttemptHistoryService, AttemptListItem};
pub use quiz::{
    Notice, QuestionView, QuizHandler, QuizRequest, QuizResponse, QuizService, SessionRegistry,
    SessionSnapshot,
};
