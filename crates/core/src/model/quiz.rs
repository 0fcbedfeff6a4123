use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::entry::VocabularyEntry;
use crate::model::ids::QuestionNumber;

//
// ─── QUIZ SET ──────────────────────────────────────────────────────────────────
//

/// Ordered questions under test, tagged with the generation that created them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSet {
    generation: u64,
    entries: Vec<VocabularyEntry>,
}

impl QuizSet {
    #[must_use]
    pub fn new(generation: u64, entries: Vec<VocabularyEntry>) -> Self {
        Self {
            generation,
            entries,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, number: QuestionNumber) -> Option<&VocabularyEntry> {
        self.entries.get(number.index())
    }

    #[must_use]
    pub fn contains(&self, number: QuestionNumber) -> bool {
        number.index() < self.entries.len()
    }

    /// Questions paired with their 1-based numbers.
    pub fn numbered(&self) -> impl Iterator<Item = (QuestionNumber, &VocabularyEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (QuestionNumber::from_index(idx), entry))
    }

    /// Builds the next set from the missed questions, keeping their relative order.
    #[must_use]
    pub fn narrowed_to(&self, missed: &[MissedQuestion], generation: u64) -> Self {
        let entries = missed
            .iter()
            .filter_map(|m| self.get(m.number).cloned())
            .collect();
        Self::new(generation, entries)
    }
}

//
// ─── ANSWER SHEET ──────────────────────────────────────────────────────────────
//

/// Raw answers typed for one quiz set generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    generation: u64,
    answers: BTreeMap<QuestionNumber, String>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            answers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn record(&mut self, number: QuestionNumber, text: impl Into<String>) {
        self.answers.insert(number, text.into());
    }

    /// Answer for `number`; absent answers read as the empty string.
    #[must_use]
    pub fn answer(&self, number: QuestionNumber) -> &str {
        self.answers.get(&number).map_or("", String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionNumber, &str)> {
        self.answers.iter().map(|(n, text)| (*n, text.as_str()))
    }
}

//
// ─── GRADING OUTPUT ────────────────────────────────────────────────────────────
//

/// One row of the grading result: a question answered incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedQuestion {
    pub number: QuestionNumber,
    pub ordinal: usize,
    pub definition: String,
    pub part_of_speech: String,
    pub expected_meaning: String,
    pub given_answer: String,
}

/// Correct answers out of total questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    #[must_use]
    pub fn from_missed(total: usize, missed: usize) -> Self {
        Self {
            correct: total.saturating_sub(missed),
            total,
        }
    }

    #[must_use]
    pub fn missed(&self) -> usize {
        self.total - self.correct
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }

    #[must_use]
    pub fn as_pair(&self) -> (usize, usize) {
        (self.correct, self.total)
    }
}
