use std::sync::Arc;

use storage::VocabularyCache;
use storage::VocabularyTable;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::history::AttemptHistoryService;
use crate::quiz::{QuizHandler, QuizService, SessionRegistry};

/// Assembles app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    handler: Arc<QuizHandler>,
    history: Arc<AttemptHistoryService>,
}

impl AppServices {
    /// Build services reading vocabulary from `vocabulary` and saving
    /// attempts to `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        vocabulary: Arc<VocabularyCache>,
        db_url: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(vocabulary, db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    #[must_use]
    pub fn in_memory(vocabulary: VocabularyTable, clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(vocabulary), clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let service = Arc::new(QuizService::new(
            clock,
            Arc::clone(&storage.vocabulary),
            Arc::clone(&storage.attempts),
        ));
        let handler = Arc::new(QuizHandler::new(service, Arc::new(SessionRegistry::new())));
        let history = Arc::new(AttemptHistoryService::new(Arc::clone(&storage.attempts)));
        Self { handler, history }
    }

    #[must_use]
    pub fn handler(&self) -> Arc<QuizHandler> {
        Arc::clone(&self.handler)
    }

    #[must_use]
    pub fn history(&self) -> Arc<AttemptHistoryService> {
        Arc::clone(&self.history)
    }
}
