//! Vocabulary CSV parsing.
//!
//! The file must carry the `English Definition`, `POS` and `Meanings`
//! columns (exact header names, any order, extra columns ignored). Row order
//! defines the day buckets. Any failure rejects the whole file.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use vocab_core::bucketing::DayPlan;
use vocab_core::model::{Day, EntryDraft, VocabularyEntry, assign_days};

pub const DEFINITION_COLUMN: &str = "English Definition";
pub const POS_COLUMN: &str = "POS";
pub const MEANING_COLUMN: &str = "Meanings";

/// Errors raised while loading the vocabulary table. All of them are fatal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed vocabulary csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("vocabulary csv is missing required column {0:?}")]
    MissingColumn(&'static str),
}

/// Immutable vocabulary list with day buckets assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyTable {
    entries: Vec<VocabularyEntry>,
    plan: DayPlan,
}

struct ColumnIndex {
    definition: usize,
    pos: usize,
    meaning: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Self {
            definition: find(DEFINITION_COLUMN)?,
            pos: find(POS_COLUMN)?,
            meaning: find(MEANING_COLUMN)?,
        })
    }

    fn draft(&self, record: &csv::StringRecord) -> EntryDraft {
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        EntryDraft::new(
            field(self.definition),
            field(self.pos),
            field(self.meaning),
        )
    }
}

impl VocabularyTable {
    /// Parse a vocabulary CSV from any reader.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingColumn` if a required header is absent and
    /// `LoadError::Csv` for malformed input (including ragged rows).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(rdr.headers()?)?;
        let mut drafts = Vec::new();
        for record in rdr.records() {
            drafts.push(columns.draft(&record?));
        }

        Ok(Self::from_drafts(drafts))
    }

    /// Load and parse the vocabulary file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if the file cannot be opened, plus any error from
    /// `from_reader`.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    #[must_use]
    pub fn from_drafts(drafts: Vec<EntryDraft>) -> Self {
        let (entries, plan) = assign_days(drafts);
        Self { entries, plan }
    }

    #[must_use]
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Entries in the bucket for `day`, in file order.
    #[must_use]
    pub fn entries_for_day(&self, day: Day) -> &[VocabularyEntry] {
        &self.entries[self.plan.rows_for(day)]
    }

    #[must_use]
    pub fn plan(&self) -> DayPlan {
        self.plan
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
No,English Definition,POS,Meanings
1,a domestic animal that barks,n.,dog
2,to move quickly on foot,v.,run
3,having great size,adj.,big
";

    #[test]
    fn parses_required_columns_in_file_order() {
        let table = VocabularyTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        let first = &table.entries()[0];
        assert_eq!(first.definition(), "a domestic animal that barks");
        assert_eq!(first.part_of_speech(), "n.");
        assert_eq!(first.meaning(), "dog");
        assert_eq!(first.ordinal(), 0);
    }

    #[test]
    fn three_rows_land_on_first_three_days() {
        let table = VocabularyTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.plan().per_day(), 1);
        for (n, meaning) in [(1, "dog"), (2, "run"), (3, "big")] {
            let day = Day::new(n).unwrap();
            let entries = table.entries_for_day(day);
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].meaning(), meaning);
            assert_eq!(entries[0].day(), day);
        }
        for n in 4..=30 {
            assert!(table.entries_for_day(Day::new(n).unwrap()).is_empty());
        }
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "Meanings,POS,English Definition\nrun,v.,to move quickly\n";
        let table = VocabularyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.entries()[0].meaning(), "run");
        assert_eq!(table.entries()[0].definition(), "to move quickly");
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "English Definition,Meanings\nbarks,dog\n";
        let err = VocabularyTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(POS_COLUMN)), "{err}");
    }

    #[test]
    fn header_names_must_match_exactly() {
        let csv = "english definition,POS,Meanings\nbarks,n.,dog\n";
        let err = VocabularyTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(DEFINITION_COLUMN)));
    }

    #[test]
    fn ragged_rows_reject_the_whole_file() {
        let csv = "English Definition,POS,Meanings\nbarks,n.,dog\nonly two,v.\n";
        let err = VocabularyTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)), "{err}");
    }

    #[test]
    fn leading_byte_order_mark_is_tolerated() {
        let csv = "\u{feff}English Definition,POS,Meanings\nbarks,n.,dog\n";
        let table = VocabularyTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn header_only_file_has_empty_days() {
        let csv = "English Definition,POS,Meanings\n";
        let table = VocabularyTable::from_reader(csv.as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.entries_for_day(Day::FIRST).is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/definitely/not/here/nawl.csv");
        let err = VocabularyTable::from_path(path).unwrap_err();
        match err {
            LoadError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
