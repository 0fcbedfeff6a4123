use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use vocab_core::model::{DAY_COUNT, Day, QuizAttempt, VocabularyEntry};

use crate::cache::VocabularyCache;
use crate::csv_source::{LoadError, VocabularyTable};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Vocabulary(#[from] LoadError),
}

/// Shape of the loaded vocabulary, for operators and the day selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyStats {
    pub total: usize,
    pub per_day: usize,
    pub bucket_sizes: [usize; DAY_COUNT as usize],
}

impl VocabularyStats {
    #[must_use]
    pub fn from_table(table: &VocabularyTable) -> Self {
        let plan = table.plan();
        Self {
            total: plan.total(),
            per_day: plan.per_day(),
            bucket_sizes: plan.bucket_sizes(),
        }
    }

    #[must_use]
    pub fn size_of(&self, day: Day) -> usize {
        self.bucket_sizes[day.index()]
    }
}

/// Persisted attempt with its storage id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRow {
    pub id: i64,
    pub attempt: QuizAttempt,
}

impl AttemptRow {
    #[must_use]
    pub fn new(id: i64, attempt: QuizAttempt) -> Self {
        Self { id, attempt }
    }
}

/// Read access to the day-bucketed vocabulary.
#[async_trait]
pub trait VocabularyRepository: Send + Sync {
    /// Entries for one day bucket, in file order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Vocabulary` if the source cannot be loaded.
    async fn entries_for_day(&self, day: Day) -> Result<Vec<VocabularyEntry>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Vocabulary` if the source cannot be loaded.
    async fn stats(&self) -> Result<VocabularyStats, StorageError>;
}

/// Append-only history of graded rounds.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Persist an attempt and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn append_attempt(&self, attempt: &QuizAttempt) -> Result<i64, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_attempt(&self, id: i64) -> Result<QuizAttempt, StorageError>;

    /// Newest attempts first, optionally restricted to one student.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures.
    async fn list_attempts(
        &self,
        student: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AttemptRow>, StorageError>;
}

#[async_trait]
impl VocabularyRepository for VocabularyCache {
    async fn entries_for_day(&self, day: Day) -> Result<Vec<VocabularyEntry>, StorageError> {
        let table = self.table()?;
        Ok(table.entries_for_day(day).to_vec())
    }

    async fn stats(&self) -> Result<VocabularyStats, StorageError> {
        let table = self.table()?;
        Ok(VocabularyStats::from_table(&table))
    }
}

/// In-memory repository for tests and prototyping.
#[derive(Clone)]
pub struct InMemoryRepository {
    vocabulary: Arc<VocabularyTable>,
    attempts: Arc<Mutex<Vec<AttemptRow>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new(VocabularyTable::from_drafts(Vec::new()))
    }
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(vocabulary: VocabularyTable) -> Self {
        Self {
            vocabulary: Arc::new(vocabulary),
            attempts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl VocabularyRepository for InMemoryRepository {
    async fn entries_for_day(&self, day: Day) -> Result<Vec<VocabularyEntry>, StorageError> {
        Ok(self.vocabulary.entries_for_day(day).to_vec())
    }

    async fn stats(&self) -> Result<VocabularyStats, StorageError> {
        Ok(VocabularyStats::from_table(&self.vocabulary))
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn append_attempt(&self, attempt: &QuizAttempt) -> Result<i64, StorageError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = i64::try_from(guard.len())
            .map_err(|_| StorageError::Serialization("attempt id overflow".into()))?
            + 1;
        guard.push(AttemptRow::new(id, attempt.clone()));
        Ok(id)
    }

    async fn get_attempt(&self, id: i64) -> Result<QuizAttempt, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|row| row.id == id)
            .map(|row| row.attempt.clone())
            .ok_or(StorageError::NotFound)
    }

    async fn list_attempts(
        &self,
        student: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AttemptRow>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<AttemptRow> = guard
            .iter()
            .filter(|row| student.is_none_or(|s| row.attempt.student() == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.attempt
                .completed_at()
                .cmp(&a.attempt.completed_at())
                .then_with(|| b.id.cmp(&a.id))
        });
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}

/// Aggregates the vocabulary and attempt repositories behind trait objects.
#[derive(Clone)]
pub struct Storage {
    pub vocabulary: Arc<dyn VocabularyRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(vocabulary: VocabularyTable) -> Self {
        let repo = InMemoryRepository::new(vocabulary);
        let vocabulary: Arc<dyn VocabularyRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo);
        Self {
            vocabulary,
            attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use vocab_core::model::EntryDraft;
    use vocab_core::time::fixed_now;

    fn table(rows: usize) -> VocabularyTable {
        VocabularyTable::from_drafts(
            (0..rows)
                .map(|i| EntryDraft::new(format!("def {i}"), "n.", format!("w{i}")))
                .collect(),
        )
    }

    fn attempt(student: &str, minutes: i64) -> QuizAttempt {
        let now = fixed_now() + Duration::minutes(minutes);
        QuizAttempt::from_persisted(student, Day::FIRST, 1, 1, 2, now, now).unwrap()
    }

    #[tokio::test]
    async fn serves_day_buckets() {
        let repo = InMemoryRepository::new(table(60));
        let day2 = repo.entries_for_day(Day::new(2).unwrap()).await.unwrap();
        let meanings: Vec<_> = day2.iter().map(VocabularyEntry::meaning).collect();
        assert_eq!(meanings, vec!["w2", "w3"]);

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total, 60);
        assert_eq!(stats.per_day, 2);
        assert_eq!(stats.size_of(Day::LAST), 2);
        assert_eq!(stats.bucket_sizes.iter().sum::<usize>(), 60);
    }

    #[tokio::test]
    async fn lists_attempts_newest_first() {
        let repo = InMemoryRepository::default();
        let first = repo.append_attempt(&attempt("Ada", 0)).await.unwrap();
        let second = repo.append_attempt(&attempt("Grace", 5)).await.unwrap();
        let third = repo.append_attempt(&attempt("Ada", 10)).await.unwrap();

        let all = repo.list_attempts(None, 10).await.unwrap();
        let ids: Vec<_> = all.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![third, second, first]);

        let ada = repo.list_attempts(Some("Ada"), 1).await.unwrap();
        assert_eq!(ada.len(), 1);
        assert_eq!(ada[0].id, third);
    }

    #[tokio::test]
    async fn missing_attempt_is_not_found() {
        let repo = InMemoryRepository::default();
        assert!(matches!(
            repo.get_attempt(42).await,
            Err(StorageError::NotFound)
        ));
    }
}
