use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use vocab_core::model::{
    Day, QuestionNumber, QuizAttempt, QuizPhase, QuizSession, StartError, VocabularyEntry,
};
use storage::repository::{AttemptRepository, VocabularyRepository, VocabularyStats};

use crate::Clock;
use crate::error::QuizServiceError;

/// Short user-facing outcome of a request, alongside the session snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Notice {
    /// Start was refused because the name was blank.
    NameRequired,
    /// The request did not apply to the session's current state.
    Ignored,
    /// Retake was asked for after a perfect round.
    NoMissedQuestions,
    Started,
    Graded,
}

/// Drives `QuizSession` transitions against storage.
///
/// Storage I/O is kept out of the session mutations so callers can hold a
/// session lock only around the synchronous parts.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    vocabulary: Arc<dyn VocabularyRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        vocabulary: Arc<dyn VocabularyRepository>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            clock,
            vocabulary,
            attempts,
        }
    }

    /// Entries for a day bucket, in file order.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the vocabulary cannot be loaded.
    pub async fn entries_for_day(
        &self,
        day: Day,
    ) -> Result<Vec<VocabularyEntry>, QuizServiceError> {
        Ok(self.vocabulary.entries_for_day(day).await?)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the vocabulary cannot be loaded.
    pub async fn vocabulary_stats(&self) -> Result<VocabularyStats, QuizServiceError> {
        Ok(self.vocabulary.stats().await?)
    }

    /// Start `day` for `student`, replacing whatever the session held.
    pub fn start(
        &self,
        session: &mut QuizSession,
        student: &str,
        day: Day,
        entries: Vec<VocabularyEntry>,
    ) -> Notice {
        match session.start(student, day, entries, self.clock.now()) {
            Ok(()) => {
                info!(
                    student = session.student().unwrap_or_default(),
                    %day,
                    questions = session.questions().len(),
                    "quiz started"
                );
                Notice::Started
            }
            Err(StartError::MissingStudentName) => {
                warn!(%day, "quiz start refused: student name is blank");
                Notice::NameRequired
            }
            Err(err) => {
                warn!(%day, error = %err, "quiz start refused");
                Notice::Ignored
            }
        }
    }

    /// Record the submitted form and grade it.
    ///
    /// Returns the attempt to persist when the submission was applied; a
    /// stale or out-of-phase submission yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Attempt` if the graded round cannot be
    /// summarized.
    pub fn submit(
        &self,
        session: &mut QuizSession,
        generation: u64,
        answers: &BTreeMap<QuestionNumber, String>,
    ) -> Result<Option<QuizAttempt>, QuizServiceError> {
        let current = session.generation();
        let applied = session
            .submit_answers(
                generation,
                answers.iter().map(|(number, text)| (*number, text.as_str())),
            )
            .is_applied();
        if !applied {
            warn!(
                submitted = generation,
                current,
                phase = ?session.phase(),
                "stale or out-of-phase submission ignored"
            );
            return Ok(None);
        }

        let Some(score) = session.score() else {
            return Ok(None);
        };
        let (Some(student), Some(day), Some(started_at)) =
            (session.student(), session.day(), session.round_started_at())
        else {
            return Ok(None);
        };

        debug!(
            student,
            %day,
            round = session.round(),
            correct = score.correct,
            total = score.total,
            "quiz graded"
        );

        let attempt = QuizAttempt::from_score(
            student,
            day,
            session.round(),
            score,
            started_at,
            self.clock.now().max(started_at),
        )?;
        Ok(Some(attempt))
    }

    /// Narrow the session to the questions just missed.
    pub fn retake(&self, session: &mut QuizSession) -> Notice {
        if session.phase() == QuizPhase::Graded && session.missed().is_empty() {
            return Notice::NoMissedQuestions;
        }
        if session.retake(self.clock.now()).is_applied() {
            debug!(
                round = session.round(),
                questions = session.questions().len(),
                "retake started"
            );
            Notice::Started
        } else {
            Notice::Ignored
        }
    }

    /// Append a graded round to the attempt history.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the attempt cannot be stored.
    pub async fn record_attempt(&self, attempt: &QuizAttempt) -> Result<i64, QuizServiceError> {
        Ok(self.attempts.append_attempt(attempt).await?)
    }
}
