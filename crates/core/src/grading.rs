//! Exact-match grading.
//!
//! An answer is correct when it equals the expected meaning after trimming
//! surrounding whitespace and lowercasing both sides. A blank answer is never
//! correct, even against a blank expected meaning. There is no partial credit
//! and no synonym or punctuation matching.

use crate::model::{AnswerSheet, MissedQuestion, QuizSet};

/// Canonical form used for comparison.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[must_use]
pub fn answers_match(given: &str, expected: &str) -> bool {
    let given = normalize_answer(given);
    !given.is_empty() && given == normalize_answer(expected)
}

/// Grades every question in `set`, returning mismatches in question order.
///
/// Questions without an answer in `sheet` are graded against the empty string.
#[must_use]
pub fn grade(set: &QuizSet, sheet: &AnswerSheet) -> Vec<MissedQuestion> {
    set.numbered()
        .filter_map(|(number, entry)| {
            let given = sheet.answer(number);
            if answers_match(given, entry.meaning()) {
                return None;
            }
            Some(MissedQuestion {
                number,
                ordinal: entry.ordinal(),
                definition: entry.definition().to_owned(),
                part_of_speech: entry.part_of_speech().to_owned(),
                expected_meaning: entry.meaning().to_owned(),
                given_answer: given.to_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, EntryDraft, QuestionNumber, VocabularyEntry};

    fn quiz(words: &[&str]) -> QuizSet {
        let entries = words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                VocabularyEntry::new(i, EntryDraft::new(format!("def {i}"), "n.", *w), Day::FIRST)
            })
            .collect();
        QuizSet::new(1, entries)
    }

    #[test]
    fn ignores_case_and_surrounding_whitespace() {
        assert!(answers_match(" Dog ", "dog"));
        assert!(answers_match("DOG", "  dog\t"));
        assert!(!answers_match("dogs", "dog"));
        assert!(!answers_match("d og", "dog"));
    }

    #[test]
    fn does_not_forgive_punctuation() {
        assert!(!answers_match("dog.", "dog"));
        assert!(!answers_match("colour", "color"));
    }

    #[test]
    fn unanswered_questions_are_missed() {
        let set = quiz(&["alpha", "beta"]);
        let sheet = AnswerSheet::new(1);
        let missed = grade(&set, &sheet);
        assert_eq!(missed.len(), 2);
        assert_eq!(missed[0].given_answer, "");
        assert_eq!(missed[1].expected_meaning, "beta");
    }

    #[test]
    fn blank_answer_never_matches_blank_meaning() {
        assert!(!answers_match("", ""));
        assert!(!answers_match("  ", "\t"));

        let set = quiz(&["", "beta"]);
        let mut sheet = AnswerSheet::new(1);
        sheet.record(QuestionNumber::from_index(1), "beta");
        let missed = grade(&set, &sheet);
        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].number.value(), 1);
        assert_eq!(missed[0].expected_meaning, "");
    }

    #[test]
    fn reports_only_mismatches_in_order() {
        let set = quiz(&["alpha", "beta", "gamma"]);
        let mut sheet = AnswerSheet::new(1);
        sheet.record(QuestionNumber::from_index(0), "wrong");
        sheet.record(QuestionNumber::from_index(1), "BETA");
        let missed = grade(&set, &sheet);
        let numbers: Vec<_> = missed.iter().map(|m| m.number.value()).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(missed[0].definition, "def 0");
        assert_eq!(missed[0].part_of_speech, "n.");
    }
}
