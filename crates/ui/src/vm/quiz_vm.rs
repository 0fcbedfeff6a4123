use services::{Notice, SessionSnapshot, VocabularyStats};
use vocab_core::model::{QuestionNumber, QuizPhase};

pub const INTRO_MESSAGE: &str =
    "Please enter your name and select a day, then click \"Start Test\".";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizStage {
    /// Nothing to answer yet.
    Intro,
    Answering,
    Results,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number: QuestionNumber,
    pub input_id: String,
    pub label: String,
    pub prompt: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissedRowVm {
    pub number: usize,
    pub definition: String,
    pub part_of_speech: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub headline: String,
    pub missed: Vec<MissedRowVm>,
}

impl ResultVm {
    #[must_use]
    pub fn can_retake(&self) -> bool {
        !self.missed.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizPageVm {
    pub stage: QuizStage,
    pub heading: String,
    pub student_line: String,
    pub generation: u64,
    pub questions: Vec<QuestionVm>,
    pub result: Option<ResultVm>,
    /// Set when a started day turned out to have no questions.
    pub empty_day: Option<String>,
}

#[must_use]
pub fn map_quiz_page(snapshot: &SessionSnapshot) -> QuizPageVm {
    let heading = snapshot
        .day
        .map(|day| format!("Vocabulary Quiz: Day {day}"))
        .unwrap_or_default();
    let student = snapshot.student.as_deref().unwrap_or_default();
    let questions: Vec<QuestionVm> = snapshot
        .questions
        .iter()
        .map(|q| QuestionVm {
            number: q.number,
            input_id: format!("answer-{}", q.number.value()),
            label: format!("Q{}.", q.number.value()),
            prompt: format!("{} ({})", q.definition, q.part_of_speech),
        })
        .collect();

    let (stage, empty_day) = match snapshot.phase {
        QuizPhase::Idle => (QuizStage::Intro, None),
        QuizPhase::InProgress if questions.is_empty() => (
            QuizStage::Intro,
            snapshot
                .day
                .map(|day| format!("Day {day} has no questions.")),
        ),
        QuizPhase::InProgress => (QuizStage::Answering, None),
        QuizPhase::Graded => (QuizStage::Results, None),
    };

    let result = snapshot.score.map(|score| ResultVm {
        headline: format!(
            "{student}, you answered {} out of {} correctly!",
            score.correct, score.total
        ),
        missed: snapshot
            .missed
            .iter()
            .map(|m| MissedRowVm {
                number: m.number.value(),
                definition: m.definition.clone(),
                part_of_speech: m.part_of_speech.clone(),
                answer: m.expected_meaning.clone(),
            })
            .collect(),
    });

    QuizPageVm {
        stage,
        heading,
        student_line: format!("Student: {student}"),
        generation: snapshot.generation,
        questions,
        result,
        empty_day,
    }
}

#[must_use]
pub fn notice_message(notice: Notice) -> Option<&'static str> {
    match notice {
        Notice::NameRequired => Some("Please enter your name before starting."),
        Notice::Ignored => Some("That action no longer applies to this quiz."),
        Notice::NoMissedQuestions => Some("Nothing to retake: every answer was correct."),
        _ => None,
    }
}

#[must_use]
pub fn vocabulary_caption(stats: &VocabularyStats) -> String {
    format!("{} words, {} per day", stats.total, stats.per_day)
}
