//! Single-slot bearer token storage.
//!
//! # Design
//! `TokenStore` is the seam between the request client and wherever the
//! token lives. `MemoryTokenStore` keeps it in-process; `FileTokenStore`
//! keeps it in a small JSON document so it survives restarts. Stores never
//! return errors: a failing medium is logged and treated as empty.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

pub trait TokenStore: Send + Sync {
    /// Current token, or `None` when logged out.
    fn get(&self) -> Option<String>;

    /// `Some` replaces the stored token, `None` erases it.
    fn set(&self, token: Option<&str>);
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: RwLock::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot.read().clone()
    }

    fn set(&self, token: Option<&str>) {
        *self.slot.write() = token.map(str::to_string);
    }
}

/// On-disk shape: one named key holding the token.
#[derive(Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// Token persisted as `{"token": "..."}` at `path`.
///
/// Writes land in a uniquely named temp file in the same directory and are
/// renamed into place, so readers see either the old document or the new
/// one.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> io::Result<Option<String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let stored: StoredToken = serde_json::from_str(&raw)?;
        Ok(Some(stored.token))
    }

    fn write(&self, token: &str) -> io::Result<()> {
        let doc = serde_json::to_vec(&StoredToken {
            token: token.to_string(),
        })?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // dropped (and deleted) on any error before persist
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&doc)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn erase(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        self.read().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), "failed to read token file: {e}");
            None
        })
    }

    fn set(&self, token: Option<&str>) {
        let result = match token {
            Some(token) => self.write(token),
            None => self.erase(),
        };
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), "failed to update token file: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);
        store.set(Some("abc"));
        assert_eq!(store.get().as_deref(), Some("abc"));
        store.set(None);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn memory_store_set_replaces() {
        let store = MemoryTokenStore::with_token("old");
        store.set(Some("new"));
        assert_eq!(store.get().as_deref(), Some("new"));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");

        FileTokenStore::new(&path).set(Some("tok1"));
        assert_eq!(FileTokenStore::new(&path).get().as_deref(), Some("tok1"));

        let raw = fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["token"], "tok1");
    }

    #[test]
    fn file_store_erase_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let store = FileTokenStore::new(&path);

        store.set(Some("tok1"));
        store.set(None);
        assert!(!path.exists());
        assert_eq!(store.get(), None);

        // erasing twice is fine
        store.set(None);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn file_store_missing_file_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn file_store_corrupt_document_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileTokenStore::new(&path).get(), None);
    }

    #[test]
    fn file_store_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let json = FileTokenStore::new(dir.path().join("a.json"));
        let cfg = FileTokenStore::new(dir.path().join("a.cfg"));

        json.set(Some("one"));
        cfg.set(Some("two"));
        json.set(Some("three"));

        assert_eq!(json.get().as_deref(), Some("three"));
        assert_eq!(cfg.get().as_deref(), Some("two"));
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.cfg", "a.json"]);
    }

    #[test]
    fn file_store_unwritable_path_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("missing-dir").join("token.json"));
        store.set(Some("tok1"));
        assert_eq!(store.get(), None);
    }
}
