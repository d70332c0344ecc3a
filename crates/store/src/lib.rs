//! Durable bookkeeping of already-notified accession versions.
//!
//! One flat file per organism (`notified_{organism}.txt`), one
//! accession version per line, append-only. A missing file reads as an
//! empty set. The [`NotifiedStore`] trait keeps notification logic
//! independent of the backing storage, so a locking or database-backed
//! implementation can slot in without touching the run loop.

pub mod error;

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use error::StoreError;

/// Per-organism set of accession versions already reported.
pub trait NotifiedStore: Send + Sync {
    /// Load the notified set for `organism`. Missing state is an empty set.
    fn load(&self, organism: &str) -> Result<HashSet<String>, StoreError>;

    /// Record `accessions` as notified for `organism`.
    ///
    /// Callers invoke this only after a successful delivery; a failed
    /// delivery must leave the set untouched so the same records are
    /// retried on the next run.
    fn append(&self, organism: &str, accessions: &[String]) -> Result<(), StoreError>;
}

/// Flat-file implementation of [`NotifiedStore`].
#[derive(Debug, Clone)]
pub struct FileNotifiedStore {
    dir: PathBuf,
}

impl FileNotifiedStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_path(&self, organism: &str) -> PathBuf {
        self.dir.join(format!("notified_{organism}.txt"))
    }
}

impl NotifiedStore for FileNotifiedStore {
    fn load(&self, organism: &str) -> Result<HashSet<String>, StoreError> {
        let path = self.file_path(organism);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(organism, path = %path.display(), "no notified file yet");
                return Ok(HashSet::new());
            }
            Err(e) => return Err(read_error(&path, e)),
        };

        let set: HashSet<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();
        Ok(set)
    }

    fn append(&self, organism: &str, accessions: &[String]) -> Result<(), StoreError> {
        if accessions.is_empty() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| write_error(&self.dir, e))?;

        let path = self.file_path(organism);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| write_error(&path, e))?;

        let mut buf = String::with_capacity(accessions.len() * 16);
        for accession in accessions {
            buf.push_str(accession);
            buf.push('\n');
        }
        // Single write so a crash can't interleave with another line.
        file.write_all(buf.as_bytes())
            .map_err(|e| write_error(&path, e))?;
        file.sync_all().map_err(|e| write_error(&path, e))?;

        tracing::info!(organism, count = accessions.len(), path = %path.display(), "recorded notified accessions");
        Ok(())
    }
}

fn read_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Read {
        path: path.display().to_string(),
        source,
    }
}

fn write_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Write {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileNotifiedStore) {
        let dir = TempDir::new().expect("create tempdir");
        let store = FileNotifiedStore::new(dir.path().join("already_notified"));
        (dir, store)
    }

    #[test]
    fn missing_file_loads_as_empty_set() {
        let (_dir, store) = temp_store();
        let set = store.load("mpox").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn append_then_load_round_trips() {
        let (_dir, store) = temp_store();
        store
            .append("mpox", &["A.1".to_string(), "B.2".to_string()])
            .unwrap();
        store.append("mpox", &["C.1".to_string()]).unwrap();

        let set = store.load("mpox").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("A.1"));
        assert!(set.contains("B.2"));
        assert!(set.contains("C.1"));
    }

    #[test]
    fn organisms_do_not_share_files() {
        let (_dir, store) = temp_store();
        store.append("mpox", &["A.1".to_string()]).unwrap();

        assert!(store.load("cchf").unwrap().is_empty());
        assert!(store.load("mpox").unwrap().contains("A.1"));
    }

    #[test]
    fn blank_lines_and_whitespace_are_ignored() {
        let (_dir, store) = temp_store();
        let state_dir = store.dir.clone();
        std::fs::create_dir_all(&state_dir).unwrap();
        std::fs::write(state_dir.join("notified_mpox.txt"), "A.1\n\n  B.2  \n\n").unwrap();

        let set = store.load("mpox").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("B.2"));
    }

    #[test]
    fn duplicate_lines_collapse_on_load() {
        let (_dir, store) = temp_store();
        store.append("mpox", &["A.1".to_string()]).unwrap();
        store.append("mpox", &["A.1".to_string()]).unwrap();

        let set = store.load("mpox").unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_append_creates_nothing() {
        let (_dir, store) = temp_store();
        store.append("mpox", &[]).unwrap();
        assert!(!store.file_path("mpox").exists());
    }

    #[test]
    fn file_is_one_accession_per_line() {
        let (_dir, store) = temp_store();
        store
            .append("mpox", &["A.1".to_string(), "B.1".to_string()])
            .unwrap();
        let content = std::fs::read_to_string(store.file_path("mpox")).unwrap();
        assert_eq!(content, "A.1\nB.1\n");
    }
}
