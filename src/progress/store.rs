use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Flat key→string map persisted as one JSON object, localStorage-style.
///
/// Every mutation persists immediately. I/O failures are logged and
/// skipped; the in-memory state stays authoritative, so the worst case is
/// stale data on disk, never a crash.
#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl ProgressStore {
    /// Volatile store with no backing file
    pub fn in_memory() -> Self {
        ProgressStore::default()
    }

    /// Open a store backed by `path`. A missing or unreadable file yields
    /// an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Ignoring corrupt store {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        ProgressStore {
            path: Some(path),
            entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
        self.persist();
    }

    pub fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match serde_json::to_string_pretty(&self.entries) {
            Ok(raw) => {
                if let Err(e) = fs::write(path, raw) {
                    log::warn!("Could not persist store {}: {}", path.display(), e);
                }
            }
            Err(e) => log::warn!("Could not serialize store: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_set_get_remove() {
        let mut store = ProgressStore::in_memory();
        assert!(store.is_empty());

        store.set("theme", "dark");
        assert_eq!(store.get("theme"), Some("dark"));

        store.set("theme", "light");
        assert_eq!(store.get("theme"), Some("light"));
        assert_eq!(store.len(), 1);

        store.remove("theme");
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = ProgressStore::open(&path);
        store.set("course-progress", "50");
        store.set("section-intro", "completed");

        let reloaded = ProgressStore::open(&path);
        assert_eq!(reloaded.get("course-progress"), Some("50"));
        assert_eq!(reloaded.get("section-intro"), Some("completed"));
    }

    #[test]
    fn test_missing_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::open(dir.path().join("does-not-exist.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all {{{").unwrap();

        let store = ProgressStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_every_set_persists_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = ProgressStore::open(&path);
        store.set("a", "1");

        // No explicit save call, the file is already current
        let reloaded = ProgressStore::open(&path);
        assert_eq!(reloaded.get("a"), Some("1"));
    }
}
