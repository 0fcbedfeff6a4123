mod attempt;
mod entry;
mod ids;
mod quiz;
mod session;

pub use ids::{DAY_COUNT, Day, DayError, QuestionNumber, SessionToken};

pub use attempt::{QuizAttempt, QuizAttemptError};
pub use entry::{EntryDraft, VocabularyEntry, assign_days};
pub use quiz::{AnswerSheet, MissedQuestion, QuizSet, Score};
pub use session::{QuizPhase, QuizSession, StartError, Transition};
