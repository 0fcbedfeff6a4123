use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::debug;
use vocab_core::model::{QuizSession, SessionToken};

use super::snapshot::SessionSnapshot;
use crate::error::QuizServiceError;

/// Live quiz sessions, one per learner.
///
/// Each token owns its own `QuizSession`; nothing is shared between them.
/// The lock is held only for synchronous session work.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionToken, QuizSession>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh idle session and return its token.
    pub fn open(&self) -> SessionToken {
        let token = SessionToken::generate();
        self.lock().insert(token, QuizSession::new());
        debug!(%token, "quiz session opened");
        token
    }

    /// Drop a session. Returns `false` if the token was unknown.
    pub fn close(&self, token: SessionToken) -> bool {
        let removed = self.lock().remove(&token).is_some();
        if removed {
            debug!(%token, "quiz session closed");
        }
        removed
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::UnknownSession` if the token is not registered.
    pub fn snapshot(&self, token: SessionToken) -> Result<SessionSnapshot, QuizServiceError> {
        self.with_session(token, |session| SessionSnapshot::capture(session))
    }

    /// Run `f` against the session for `token` under the registry lock.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::UnknownSession` if the token is not registered.
    pub fn with_session<R>(
        &self,
        token: SessionToken,
        f: impl FnOnce(&mut QuizSession) -> R,
    ) -> Result<R, QuizServiceError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(&token)
            .ok_or(QuizServiceError::UnknownSession(token))?;
        Ok(f(session))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionToken, QuizSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
