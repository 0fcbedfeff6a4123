mod handler;
mod registry;
mod service;
mod snapshot;

// Public API of the quiz subsystem.
pub use crate::error::QuizServiceError;
pub use handler::{QuizHandler, QuizRequest, QuizResponse};
pub use registry::SessionRegistry;
pub use service::{Notice, QuizService};
pub use snapshot::{QuestionView, SessionSnapshot};
