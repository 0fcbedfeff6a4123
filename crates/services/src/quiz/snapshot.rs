use std::collections::BTreeMap;

use vocab_core::model::{Day, MissedQuestion, QuestionNumber, QuizPhase, QuizSession, Score};

/// A question as shown to the learner; the expected meaning is withheld.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub number: QuestionNumber,
    pub definition: String,
    pub part_of_speech: String,
}

/// Read-only copy of a session, safe to hand to the presentation layer.
///
/// No pre-formatted strings; the UI decides how to render each field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub phase: QuizPhase,
    pub student: Option<String>,
    pub day: Option<Day>,
    pub round: u32,
    pub generation: u64,
    pub questions: Vec<QuestionView>,
    pub answers: BTreeMap<QuestionNumber, String>,
    pub score: Option<Score>,
    pub missed: Vec<MissedQuestion>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn capture(session: &QuizSession) -> Self {
        let questions = session
            .questions()
            .numbered()
            .map(|(number, entry)| QuestionView {
                number,
                definition: entry.definition().to_owned(),
                part_of_speech: entry.part_of_speech().to_owned(),
            })
            .collect();
        let answers = session
            .answers()
            .iter()
            .map(|(number, text)| (number, text.to_owned()))
            .collect();

        Self {
            phase: session.phase(),
            student: session.student().map(str::to_owned),
            day: session.day(),
            round: session.round(),
            generation: session.generation(),
            questions,
            answers,
            score: session.score(),
            missed: session.missed().to_vec(),
        }
    }
}
