use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::Day;
use crate::model::quiz::Score;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizAttemptError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("student name is empty")]
    MissingStudent,

    #[error("too many questions for a single attempt: {len}")]
    TooManyQuestions { len: usize },

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    ScoreOverflow { correct: u32, total: u32 },
}

/// Summary of one graded round, kept in the attempt history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    student: String,
    day: Day,
    round: u32,
    correct: u32,
    total: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizAttempt {
    /// Rehydrate an attempt from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `QuizAttemptError` if the stored values are inconsistent.
    pub fn from_persisted(
        student: impl Into<String>,
        day: Day,
        round: u32,
        correct: u32,
        total: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizAttemptError> {
        let student = student.into();
        if student.trim().is_empty() {
            return Err(QuizAttemptError::MissingStudent);
        }
        if completed_at < started_at {
            return Err(QuizAttemptError::InvalidTimeRange);
        }
        if correct > total {
            return Err(QuizAttemptError::ScoreOverflow { correct, total });
        }

        Ok(Self {
            student,
            day,
            round,
            correct,
            total,
            started_at,
            completed_at,
        })
    }

    /// Build an attempt from a fresh grading score.
    ///
    /// # Errors
    ///
    /// Returns `QuizAttemptError::TooManyQuestions` if the counts do not fit in `u32`,
    /// or any validation error from `from_persisted`.
    pub fn from_score(
        student: impl Into<String>,
        day: Day,
        round: u32,
        score: Score,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizAttemptError> {
        let total = u32::try_from(score.total)
            .map_err(|_| QuizAttemptError::TooManyQuestions { len: score.total })?;
        let correct = u32::try_from(score.correct)
            .map_err(|_| QuizAttemptError::TooManyQuestions { len: score.correct })?;

        Self::from_persisted(student, day, round, correct, total, started_at, completed_at)
    }

    #[must_use]
    pub fn student(&self) -> &str {
        &self.student
    }

    #[must_use]
    pub fn day(&self) -> Day {
        self.day
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn missed(&self) -> u32 {
        self.total - self.correct
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn attempt_from_score_keeps_counts() {
        let now = fixed_now();
        let attempt = QuizAttempt::from_score(
            "Ada",
            Day::new(4).unwrap(),
            2,
            Score::from_missed(19, 5),
            now,
            now + Duration::minutes(3),
        )
        .unwrap();

        assert_eq!(attempt.correct(), 14);
        assert_eq!(attempt.total(), 19);
        assert_eq!(attempt.missed(), 5);
        assert_eq!(attempt.round(), 2);
        assert_eq!(attempt.day().value(), 4);
    }

    #[test]
    fn rejects_inverted_time_range() {
        let now = fixed_now();
        let err = QuizAttempt::from_persisted("Ada", Day::FIRST, 1, 1, 1, now, now - Duration::seconds(1))
            .unwrap_err();
        assert_eq!(err, QuizAttemptError::InvalidTimeRange);
    }

    #[test]
    fn rejects_more_correct_than_total() {
        let now = fixed_now();
        let err = QuizAttempt::from_persisted("Ada", Day::FIRST, 1, 4, 3, now, now).unwrap_err();
        assert_eq!(err, QuizAttemptError::ScoreOverflow { correct: 4, total: 3 });
    }

    #[test]
    fn rejects_blank_student() {
        let now = fixed_now();
        let err = QuizAttempt::from_persisted(" ", Day::FIRST, 1, 0, 0, now, now).unwrap_err();
        assert_eq!(err, QuizAttemptError::MissingStudent);
    }
}
