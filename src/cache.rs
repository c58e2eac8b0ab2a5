use crate::data::{load_player_file, MatchStore};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CachedStore {
    pub modified: Option<SystemTime>,
    pub loaded_at: DateTime<Utc>,
    pub matches: Arc<MatchStore>,
}

/// Read-through cache of parsed player files. An entry is reused until the
/// file's modification time changes or it is invalidated explicitly.
#[derive(Debug, Default)]
pub struct StoreCache {
    entries: HashMap<PathBuf, CachedStore>,
}

impl StoreCache {
    pub fn new() -> Self {
        StoreCache {
            entries: HashMap::new(),
        }
    }

    pub fn get_or_load(&mut self, path: &Path) -> AppResult<Arc<MatchStore>> {
        let modified = fs::metadata(path)?.modified().ok();

        if let Some(cached) = self.entries.get(path) {
            if modified.is_some() && cached.modified == modified {
                debug!(
                    path = %path.display(),
                    loaded_at = %cached.loaded_at.to_rfc3339(),
                    "Store cache hit"
                );
                return Ok(Arc::clone(&cached.matches));
            }
            debug!(path = %path.display(), "Store file changed, reloading");
        }

        let matches = Arc::new(load_player_file(path)?);
        self.entries.insert(
            path.to_path_buf(),
            CachedStore {
                modified,
                loaded_at: Utc::now(),
                matches: Arc::clone(&matches),
            },
        );

        Ok(matches)
    }

    pub fn get(&self, path: &Path) -> Option<&CachedStore> {
        self.entries.get(path)
    }

    /// Drops one entry; returns whether it was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
