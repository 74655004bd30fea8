//! Manifest store - one raw CODEOWNERS text per repository
//!
//! Entries are keyed by repository name and considered stale after a fixed
//! TTL. The trait keeps the resolver testable without disk I/O; the
//! file-backed store derives freshness from the file's modification time.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// A cached manifest and when it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub raw_text: String,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_stale(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> bool {
        now - self.fetched_at > ttl
    }
}

/// Key-value store for raw manifests, keyed by repository name
pub trait ManifestStore {
    fn load(&self, repo: &str) -> Result<Option<CacheEntry>>;
    fn save(&mut self, repo: &str, raw_text: &str) -> Result<()>;
}

/// File-backed store: one `{repo}-owners.txt` per repository.
///
/// Entries are overwritten on refresh but never pruned; the directory grows
/// across runs until `clear` is invoked.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default cache directory under the system temp dir
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("ownerscan")
    }

    fn entry_path(&self, repo: &str) -> PathBuf {
        self.dir.join(format!("{repo}-owners.txt"))
    }

    /// Remove the whole cache directory
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)
                .with_context(|| format!("Failed to remove cache dir {:?}", self.dir))?;
        }
        Ok(())
    }
}

impl ManifestStore for FileStore {
    fn load(&self, repo: &str) -> Result<Option<CacheEntry>> {
        let path = self.entry_path(repo);
        if !path.exists() {
            return Ok(None);
        }

        let raw_text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file {:?}", path))?;
        let mtime = fs::metadata(&path)
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to stat cache file {:?}", path))?;

        Ok(Some(CacheEntry {
            raw_text,
            fetched_at: DateTime::<Utc>::from(mtime),
        }))
    }

    fn save(&mut self, repo: &str, raw_text: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache dir {:?}", self.dir))?;
        let path = self.entry_path(repo);
        fs::write(&path, raw_text)
            .with_context(|| format!("Failed to write cache file {:?}", path))?;
        Ok(())
    }
}

/// In-memory store used by tests and short-lived embeddings
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, CacheEntry>,
}

impl MemoryStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry with an explicit timestamp (for TTL tests)
    #[allow(dead_code)]
    pub fn insert_at(&mut self, repo: &str, raw_text: &str, fetched_at: DateTime<Utc>) {
        self.entries.insert(
            repo.to_string(),
            CacheEntry {
                raw_text: raw_text.to_string(),
                fetched_at,
            },
        );
    }
}

impl ManifestStore for MemoryStore {
    fn load(&self, repo: &str) -> Result<Option<CacheEntry>> {
        Ok(self.entries.get(repo).cloned())
    }

    fn save(&mut self, repo: &str, raw_text: &str) -> Result<()> {
        self.entries.insert(
            repo.to_string(),
            CacheEntry {
                raw_text: raw_text.to_string(),
                fetched_at: Utc::now(),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_round_trip() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::new(temp.path().join("cache"));

        store.save("billing", "* @acme/platform\n").unwrap();
        let entry = store.load("billing").unwrap().expect("entry present");
        assert_eq!(entry.raw_text, "* @acme/platform\n");
        assert!(!entry.is_stale(Duration::hours(1), Utc::now()));
    }

    #[test]
    fn test_file_store_missing_entry_is_none() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path());
        assert!(store.load("nope").unwrap().is_none());
    }

    #[test]
    fn test_file_store_save_overwrites() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::new(temp.path());

        store.save("svc", "old").unwrap();
        store.save("svc", "new").unwrap();
        assert_eq!(store.load("svc").unwrap().unwrap().raw_text, "new");
    }

    #[test]
    fn test_clear_removes_directory() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("cache");
        let mut store = FileStore::new(&dir);

        store.save("svc", "x").unwrap();
        assert!(dir.exists());
        store.clear().unwrap();
        assert!(!dir.exists());

        // Clearing an absent directory is fine too.
        store.clear().unwrap();
    }

    #[test]
    fn test_staleness_boundary() {
        let now = Utc::now();
        let entry = CacheEntry {
            raw_text: String::new(),
            fetched_at: now - Duration::hours(2),
        };
        assert!(entry.is_stale(Duration::hours(1), now));

        let fresh = CacheEntry {
            raw_text: String::new(),
            fetched_at: now - Duration::minutes(59),
        };
        assert!(!fresh.is_stale(Duration::hours(1), now));
    }

    #[test]
    fn test_memory_store_insert_at_controls_timestamp() {
        let mut store = MemoryStore::new();
        let old = Utc::now() - Duration::hours(3);
        store.insert_at("svc", "text", old);

        let entry = store.load("svc").unwrap().unwrap();
        assert_eq!(entry.fetched_at, old);
        assert!(entry.is_stale(Duration::hours(1), Utc::now()));
    }
}
