use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::grading::grade;
use crate::model::entry::VocabularyEntry;
use crate::model::ids::{Day, QuestionNumber};
use crate::model::quiz::{AnswerSheet, MissedQuestion, QuizSet, Score};

//
// ─── PHASES & OUTCOMES ─────────────────────────────────────────────────────────
//

/// Where a quiz session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizPhase {
    #[default]
    Idle,
    InProgress,
    Graded,
}

/// Whether an event changed the session.
///
/// Events arriving in the wrong phase, or tagged with a stale generation,
/// are `Ignored` rather than treated as errors.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Transition::Applied)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StartError {
    #[error("a student name is required to start a quiz")]
    MissingStudentName,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's quiz: the active question set, typed answers and grading.
///
/// `Idle → InProgress → Graded`, then either `Graded → InProgress` through
/// `retake` (missed questions only) or back to `InProgress` through `start`
/// (new day, full reset).
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    phase: QuizPhase,
    student: Option<String>,
    day: Option<Day>,
    round: u32,
    set: QuizSet,
    answers: AnswerSheet,
    missed: Vec<MissedQuestion>,
    round_started_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh quiz for `day`.
    ///
    /// Entries belonging to other days are dropped. Answers, grading and the
    /// round counter are reset.
    ///
    /// # Errors
    ///
    /// Returns `StartError::MissingStudentName` when `student` is blank; the
    /// session is left untouched.
    pub fn start(
        &mut self,
        student: &str,
        day: Day,
        entries: Vec<VocabularyEntry>,
        started_at: DateTime<Utc>,
    ) -> Result<(), StartError> {
        let student = student.trim();
        if student.is_empty() {
            return Err(StartError::MissingStudentName);
        }

        let entries = entries.into_iter().filter(|e| e.day() == day).collect();
        let generation = self.next_generation();

        self.student = Some(student.to_owned());
        self.day = Some(day);
        self.round = 1;
        self.set = QuizSet::new(generation, entries);
        self.answers = AnswerSheet::new(generation);
        self.missed.clear();
        self.round_started_at = Some(started_at);
        self.phase = QuizPhase::InProgress;
        Ok(())
    }

    /// Stores the raw text typed for `number`.
    ///
    /// Only accepted while in progress, for the current generation and for a
    /// question that exists.
    pub fn record_answer(
        &mut self,
        generation: u64,
        number: QuestionNumber,
        text: impl Into<String>,
    ) -> Transition {
        if self.phase != QuizPhase::InProgress
            || generation != self.set.generation()
            || !self.set.contains(number)
        {
            return Transition::Ignored;
        }
        self.answers.record(number, text);
        Transition::Applied
    }

    /// Grades the current answers and moves to `Graded`.
    pub fn submit(&mut self) -> Transition {
        if self.phase != QuizPhase::InProgress {
            return Transition::Ignored;
        }
        self.missed = grade(&self.set, &self.answers);
        self.phase = QuizPhase::Graded;
        Transition::Applied
    }

    /// Records a whole form of answers for `generation`, then grades.
    ///
    /// A stale generation is ignored as a whole: nothing is recorded and the
    /// session stays in progress.
    pub fn submit_answers<I, S>(&mut self, generation: u64, answers: I) -> Transition
    where
        I: IntoIterator<Item = (QuestionNumber, S)>,
        S: Into<String>,
    {
        if self.phase != QuizPhase::InProgress || generation != self.set.generation() {
            return Transition::Ignored;
        }
        for (number, text) in answers {
            let _ = self.record_answer(generation, number, text);
        }
        self.submit()
    }

    /// Narrows the quiz to the questions missed in the last grading.
    pub fn retake(&mut self, started_at: DateTime<Utc>) -> Transition {
        if self.phase != QuizPhase::Graded || self.missed.is_empty() {
            return Transition::Ignored;
        }

        let generation = self.next_generation();
        self.set = self.set.narrowed_to(&self.missed, generation);
        self.answers = AnswerSheet::new(generation);
        self.missed.clear();
        self.round = self.round.saturating_add(1);
        self.round_started_at = Some(started_at);
        self.phase = QuizPhase::InProgress;
        Transition::Applied
    }

    /// `(correct, total)` for the last grading; only available once graded.
    #[must_use]
    pub fn score(&self) -> Option<Score> {
        (self.phase == QuizPhase::Graded)
            .then(|| Score::from_missed(self.set.len(), self.missed.len()))
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn student(&self) -> Option<&str> {
        self.student.as_deref()
    }

    #[must_use]
    pub fn day(&self) -> Option<Day> {
        self.day
    }

    /// 1 for a fresh start, incremented by each retake; 0 while idle.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.set.generation()
    }

    #[must_use]
    pub fn questions(&self) -> &QuizSet {
        &self.set
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// The grading result; empty unless graded.
    #[must_use]
    pub fn missed(&self) -> &[MissedQuestion] {
        &self.missed
    }

    #[must_use]
    pub fn round_started_at(&self) -> Option<DateTime<Utc>> {
        self.round_started_at
    }

    fn next_generation(&self) -> u64 {
        self.set.generation().wrapping_add(1)
    }
}
