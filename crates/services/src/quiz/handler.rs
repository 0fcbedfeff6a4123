use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::error;
use vocab_core::model::{Day, QuestionNumber, SessionToken};

use super::registry::SessionRegistry;
use super::service::{Notice, QuizService};
use super::snapshot::SessionSnapshot;
use crate::error::QuizServiceError;

/// One user interaction with a quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizRequest {
    Start { student: String, day: Day },
    Submit {
        generation: u64,
        answers: BTreeMap<QuestionNumber, String>,
    },
    Retake,
    Refresh,
}

/// Session state after a request, plus what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResponse {
    pub snapshot: SessionSnapshot,
    pub notice: Option<Notice>,
    /// History id of the attempt saved by this request, if any.
    pub attempt_id: Option<i64>,
}

/// Request/response loop over the session registry.
///
/// Every interaction arrives as a `QuizRequest`; the handler applies it to
/// the caller's session and returns a fresh snapshot to render.
#[derive(Clone)]
pub struct QuizHandler {
    service: Arc<QuizService>,
    registry: Arc<SessionRegistry>,
}

impl QuizHandler {
    #[must_use]
    pub fn new(service: Arc<QuizService>, registry: Arc<SessionRegistry>) -> Self {
        Self { service, registry }
    }

    #[must_use]
    pub fn service(&self) -> Arc<QuizService> {
        Arc::clone(&self.service)
    }

    pub fn open_session(&self) -> SessionToken {
        self.registry.open()
    }

    pub fn close_session(&self, token: SessionToken) -> bool {
        self.registry.close(token)
    }

    /// Apply `request` to the session identified by `token`.
    ///
    /// A failure to save a graded round is logged and reported through
    /// `attempt_id: None`; the graded session is still returned.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::UnknownSession` for an unregistered token and
    /// `QuizServiceError::Storage` if the day's vocabulary cannot be loaded. A
    /// blank student name is answered with `Notice::NameRequired` before any
    /// vocabulary is read.
    pub async fn handle(
        &self,
        token: SessionToken,
        request: QuizRequest,
    ) -> Result<QuizResponse, QuizServiceError> {
        match request {
            QuizRequest::Start { student, day } => {
                // Fail fast on unknown tokens before touching storage.
                self.registry.with_session(token, |_| ())?;
                let entries = if student.trim().is_empty() {
                    Vec::new()
                } else {
                    self.service.entries_for_day(day).await?
                };
                let (notice, snapshot) = self.registry.with_session(token, |session| {
                    let notice = self.service.start(session, &student, day, entries);
                    (notice, SessionSnapshot::capture(session))
                })?;
                Ok(QuizResponse {
                    snapshot,
                    notice: Some(notice),
                    attempt_id: None,
                })
            }
            QuizRequest::Submit {
                generation,
                answers,
            } => {
                let (attempt, snapshot) = self.registry.with_session(token, |session| {
                    let attempt = self.service.submit(session, generation, &answers);
                    (attempt, SessionSnapshot::capture(session))
                })?;
                let Some(attempt) = attempt? else {
                    return Ok(QuizResponse {
                        snapshot,
                        notice: Some(Notice::Ignored),
                        attempt_id: None,
                    });
                };

                let attempt_id = match self.service.record_attempt(&attempt).await {
                    Ok(id) => Some(id),
                    Err(err) => {
                        error!(%token, error = %err, "failed to save quiz attempt");
                        None
                    }
                };
                Ok(QuizResponse {
                    snapshot,
                    notice: Some(Notice::Graded),
                    attempt_id,
                })
            }
            QuizRequest::Retake => {
                let (notice, snapshot) = self.registry.with_session(token, |session| {
                    let notice = self.service.retake(session);
                    (notice, SessionSnapshot::capture(session))
                })?;
                Ok(QuizResponse {
                    snapshot,
                    notice: Some(notice),
                    attempt_id: None,
                })
            }
            QuizRequest::Refresh => Ok(QuizResponse {
                snapshot: self.registry.snapshot(token)?,
                notice: None,
                attempt_id: None,
            }),
        }
    }
}
