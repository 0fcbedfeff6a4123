//! Process-wide vocabulary table, loaded once and shared read-only.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use tracing::{info, warn};

use crate::csv_source::{LoadError, VocabularyTable};

struct Loaded {
    table: Arc<VocabularyTable>,
    modified: Option<SystemTime>,
    /// Modification time of a file version that failed to parse.
    rejected: Option<Option<SystemTime>>,
}

/// Lazily loaded vocabulary file.
///
/// The table is parsed at most once per file version: it is reloaded only when
/// the file's modification time changes. Readers always get a complete table.
/// A failed reload returns the error once; later reads of the same file
/// version are served the previous table until the file changes again.
pub struct VocabularyCache {
    path: PathBuf,
    state: RwLock<Option<Loaded>>,
}

impl VocabularyCache {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(None),
        }
    }

    /// Build a cache and load the file immediately.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file cannot be read or parsed.
    pub fn preload(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let cache = Self::new(path);
        cache.table()?;
        Ok(cache)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current table, loading or reloading it when needed.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` the first time a new file version fails to load, or
    /// whenever the file is unusable and nothing has been loaded yet.
    pub fn table(&self) -> Result<Arc<VocabularyTable>, LoadError> {
        let modified = match modified_at(&self.path) {
            Ok(modified) => modified,
            Err(err) => {
                if let Some(table) = self.cached_table() {
                    warn!(path = %self.path.display(), error = %err, "vocabulary file unreadable, serving cached table");
                    return Ok(table);
                }
                return Err(err);
            }
        };

        {
            let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(loaded) = guard.as_ref() {
                if loaded.modified == modified {
                    return Ok(Arc::clone(&loaded.table));
                }
                if loaded.rejected == Some(modified) {
                    warn!(path = %self.path.display(), "vocabulary file still invalid, serving cached table");
                    return Ok(Arc::clone(&loaded.table));
                }
            }
        }

        let table = match VocabularyTable::from_path(&self.path) {
            Ok(table) => Arc::new(table),
            Err(err) => {
                let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
                if let Some(loaded) = guard.as_mut() {
                    warn!(path = %self.path.display(), error = %err, "vocabulary reload failed, keeping previous table");
                    loaded.rejected = Some(modified);
                }
                return Err(err);
            }
        };
        info!(
            path = %self.path.display(),
            entries = table.len(),
            per_day = table.plan().per_day(),
            "vocabulary loaded"
        );

        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Loaded {
            table: Arc::clone(&table),
            modified,
            rejected: None,
        });
        Ok(table)
    }

    fn cached_table(&self) -> Option<Arc<VocabularyTable>> {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|loaded| Arc::clone(&loaded.table))
    }
}

fn modified_at(path: &Path) -> Result<Option<SystemTime>, LoadError> {
    let metadata = std::fs::metadata(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Some filesystems do not report mtimes; treat those files as never changing.
    Ok(metadata.modified().ok())
}
