use serde::{Deserialize, Serialize};

use crate::bucketing::DayPlan;
use crate::model::ids::Day;

//
// ─── ENTRY DRAFT ───────────────────────────────────────────────────────────────
//

/// A vocabulary row as read from the source, before a day is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub definition: String,
    pub part_of_speech: String,
    pub meaning: String,
}

impl EntryDraft {
    #[must_use]
    pub fn new(
        definition: impl Into<String>,
        part_of_speech: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            definition: definition.into(),
            part_of_speech: part_of_speech.into(),
            meaning: meaning.into(),
        }
    }
}

//
// ─── VOCABULARY ENTRY ──────────────────────────────────────────────────────────
//

/// Immutable vocabulary row with its day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    ordinal: usize,
    definition: String,
    part_of_speech: String,
    meaning: String,
    day: Day,
}

impl VocabularyEntry {
    #[must_use]
    pub fn new(ordinal: usize, draft: EntryDraft, day: Day) -> Self {
        Self {
            ordinal,
            definition: draft.definition,
            part_of_speech: draft.part_of_speech,
            meaning: draft.meaning,
            day,
        }
    }

    /// Zero-based row position in the source file.
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn part_of_speech(&self) -> &str {
        &self.part_of_speech
    }

    /// The expected answer.
    #[must_use]
    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    #[must_use]
    pub fn day(&self) -> Day {
        self.day
    }
}

/// Assigns ordinals and days to drafts in file order.
///
/// Returns the entries together with the plan used to bucket them.
#[must_use]
pub fn assign_days(drafts: Vec<EntryDraft>) -> (Vec<VocabularyEntry>, DayPlan) {
    let plan = DayPlan::for_total(drafts.len());
    let entries = drafts
        .into_iter()
        .enumerate()
        .filter_map(|(row, draft)| {
            plan.day_for_row(row)
                .map(|day| VocabularyEntry::new(row, draft, day))
        })
        .collect();
    (entries, plan)
}
