use std::sync::Arc;

use services::{AttemptHistoryService, QuizHandler};
use vocab_core::model::SessionToken;

pub trait UiApp: Send + Sync {
    fn quiz_handler(&self) -> Arc<QuizHandler>;
    fn attempt_history(&self) -> Arc<AttemptHistoryService>;
}

/// Services plus the quiz session owned by this window.
#[derive(Clone)]
pub struct AppContext {
    quiz_handler: Arc<QuizHandler>,
    attempt_history: Arc<AttemptHistoryService>,
    session_token: SessionToken,
}

impl AppContext {
    /// Build a context and open a fresh quiz session for it.
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let quiz_handler = app.quiz_handler();
        let session_token = quiz_handler.open_session();
        Self::with_session(app, session_token)
    }

    /// Build a context bound to an already opened session.
    #[must_use]
    pub fn with_session(app: &Arc<dyn UiApp>, session_token: SessionToken) -> Self {
        Self {
            quiz_handler: app.quiz_handler(),
            attempt_history: app.attempt_history(),
            session_token,
        }
    }

    #[must_use]
    pub fn quiz_handler(&self) -> Arc<QuizHandler> {
        Arc::clone(&self.quiz_handler)
    }

    #[must_use]
    pub fn attempt_history(&self) -> Arc<AttemptHistoryService> {
        Arc::clone(&self.attempt_history)
    }

    #[must_use]
    pub fn session_token(&self) -> SessionToken {
        self.session_token
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
