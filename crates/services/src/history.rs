use std::sync::Arc;

use chrono::{DateTime, Utc};
use storage::repository::{AttemptRepository, AttemptRow};
use vocab_core::model::Day;

use crate::error::HistoryError;

/// Presentation-agnostic list item for a saved attempt.
///
/// No pre-formatted strings; the UI formats timestamps and scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptListItem {
    pub id: i64,
    pub student: String,
    pub day: Day,
    pub round: u32,
    pub correct: u32,
    pub total: u32,
    pub completed_at: DateTime<Utc>,
}

impl AttemptListItem {
    #[must_use]
    pub fn from_row(row: &AttemptRow) -> Self {
        let attempt = &row.attempt;
        Self {
            id: row.id,
            student: attempt.student().to_owned(),
            day: attempt.day(),
            round: attempt.round(),
            correct: attempt.correct(),
            total: attempt.total(),
            completed_at: attempt.completed_at(),
        }
    }
}

/// Read side of the attempt history.
#[derive(Clone)]
pub struct AttemptHistoryService {
    attempts: Arc<dyn AttemptRepository>,
}

impl AttemptHistoryService {
    #[must_use]
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }

    /// Most recent attempts first, optionally for a single student.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn list_recent(
        &self,
        student: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AttemptListItem>, HistoryError> {
        let student = student.map(str::trim).filter(|s| !s.is_empty());
        let rows = self.attempts.list_attempts(student, limit).await?;
        Ok(rows.iter().map(AttemptListItem::from_row).collect())
    }
}
