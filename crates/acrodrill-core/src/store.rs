//! Acronym store persistence.
//!
//! The store lives in a single pretty-printed JSON file. Every save rewrites
//! the whole file through a temporary sibling that is renamed into place, so
//! readers only ever see the previous or the new content.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::StoreError;
use crate::model::AcronymStore;

/// Default store file name, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "new_acronyms.json";

/// Where an [`AcronymStore`] is loaded from and saved to.
pub trait StoreBackend {
    /// Human-readable location, used in messages and logs.
    fn location(&self) -> String;

    /// Load the full store.
    fn load(&self) -> Result<AcronymStore, StoreError>;

    /// Persist the full store, replacing whatever was there.
    fn save(&self, store: &AcronymStore) -> Result<(), StoreError>;
}

/// A store backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with an empty store if it does not exist yet.
    ///
    /// Returns `true` if the file was created, `false` if it already existed.
    pub fn init(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&AcronymStore::new())?;
        Ok(true)
    }

    /// Swap `target` for a temp sibling holding `contents`, keeping the
    /// target's permissions.
    fn replace_contents(&self, target: &Path, contents: &[u8]) -> Result<(), StoreError> {
        let permissions = std::fs::metadata(target)
            .map_err(|e| self.write_error(e))?
            .permissions();

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        tmp.write_all(contents).map_err(|e| self.write_error(e))?;
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| self.write_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_error(e))?;
        tmp.persist(target).map_err(|e| self.write_error(e.error))?;
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl StoreBackend for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<AcronymStore, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                StoreError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let store: AcronymStore =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "loaded {} acronyms ({} terms) from {}",
            store.len(),
            store.term_count(),
            self.path.display()
        );
        Ok(store)
    }

    fn save(&self, store: &AcronymStore) -> Result<(), StoreError> {
        let json = to_pretty_json(store)?;

        // write through a symlinked store path so the link itself survives
        let target = std::fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let created = !target.exists();
        if created {
            // a fresh file picks up the process umask; the temp file copies
            // its permissions instead of keeping its own 0600
            std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&target)
                .map_err(|e| self.write_error(e))?;
        }

        if let Err(e) = self.replace_contents(&target, &json) {
            if created {
                let _ = std::fs::remove_file(&target);
            }
            return Err(e);
        }

        tracing::debug!("saved {} acronyms to {}", store.len(), target.display());
        Ok(())
    }
}

/// Serialize with four-space indentation and a trailing newline.
fn to_pretty_json(store: &AcronymStore) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    store.serialize(&mut ser).map_err(StoreError::Serialize)?;
    buf.push(b'\n');
    Ok(buf)
}

/// An in-memory store for tests.
///
/// Records how many saves happened and can be told to fail them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<AcronymStore>,
    save_count: Cell<usize>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new(initial: AcronymStore) -> Self {
        Self {
            saved: RefCell::new(initial),
            save_count: Cell::new(0),
            fail_saves: false,
        }
    }

    /// A store whose every save fails with a permission error.
    pub fn failing(initial: AcronymStore) -> Self {
        Self {
            fail_saves: true,
            ..Self::new(initial)
        }
    }

    /// The last successfully saved store.
    pub fn saved(&self) -> AcronymStore {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl StoreBackend for MemoryStore {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn load(&self) -> Result<AcronymStore, StoreError> {
        Ok(self.saved())
    }

    fn save(&self, store: &AcronymStore) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Write {
                path: PathBuf::from(self.location()),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only store"),
            });
        }
        *self.saved.borrow_mut() = store.clone();
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TermMap;

    fn http() -> TermMap {
        [("H", "Hypertext"), ("T", "Transfer"), ("P", "Protocol")]
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect()
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileStore::new(dir.path().join("acronyms.json"));

        let mut store = AcronymStore::new();
        store.add("HTTP", http());
        store.add("NASA", [("N", "National".to_string())].into_iter().collect());
        store.add("EMPTY", TermMap::new());
        backend.save(&store).unwrap();

        let loaded = backend.load().unwrap();
        assert_eq!(loaded, store);
        assert_eq!(
            loaded.names().collect::<Vec<_>>(),
            vec!["HTTP", "NASA", "EMPTY"]
        );
    }

    #[test]
    fn save_writes_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acronyms.json");
        let mut store = AcronymStore::new();
        store.add("NASA", [("N", "National".to_string())].into_iter().collect());

        JsonFileStore::new(&path).save(&store).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\n    \"NASA\": {\n        \"N\": \"National\"\n    }\n}\n"
        );
    }

    #[test]
    fn save_overwrites_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acronyms.json");
        std::fs::write(&path, r#"{"OLD": {"O": "Old"}, "GONE": {}}"#).unwrap();
        let backend = JsonFileStore::new(&path);

        let mut store = AcronymStore::new();
        store.add("NEW", TermMap::new());
        backend.save(&store).unwrap();

        let loaded = backend.load().unwrap();
        assert_eq!(loaded.names().collect::<Vec<_>>(), vec!["NEW"]);
        // no temp files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn save_into_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileStore::new(dir.path().join("nope").join("acronyms.json"));

        let err = backend.save(&AcronymStore::new()).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acronyms.json");
        for expected in [0o644, 0o640] {
            std::fs::write(&path, "{}").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(expected)).unwrap();

            let mut store = AcronymStore::new();
            store.add("NASA", TermMap::new());
            JsonFileStore::new(&path).save(&store).unwrap();

            assert_eq!(mode(&path), expected);
        }
    }

    #[cfg(unix)]
    #[test]
    fn new_store_gets_default_permissions() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.json");
        std::fs::write(&plain, "{}").unwrap();

        let path = dir.path().join("acronyms.json");
        assert!(JsonFileStore::new(&path).init().unwrap());

        assert_eq!(mode(&path), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn save_through_symlink_keeps_link() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.json");
        let link = dir.path().join("link.json");
        std::fs::write(&real, "{}").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let backend = JsonFileStore::new(&link);
        let mut store = AcronymStore::new();
        store.add("LINK", TermMap::new());
        backend.save(&store).unwrap();

        assert!(std::fs::symlink_metadata(&link)
            .unwrap()
            .file_type()
            .is_symlink());
        assert!(JsonFileStore::new(&real).load().unwrap().contains("LINK"));
    }

    #[test]
    fn init_creates_empty_store_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acronyms.json");
        let backend = JsonFileStore::new(&path);

        assert!(backend.init().unwrap());
        assert!(backend.load().unwrap().is_empty());

        std::fs::write(&path, r#"{"KEEP": {}}"#).unwrap();
        assert!(!backend.init().unwrap());
        assert!(backend.load().unwrap().contains("KEEP"));
    }

    #[test]
    fn memory_store_counts_saves() {
        let backend = MemoryStore::default();
        let mut store = AcronymStore::new();
        store.add("HTTP", http());

        backend.save(&store).unwrap();
        assert_eq!(backend.save_count(), 1);
        assert_eq!(backend.load().unwrap(), store);

        let failing = MemoryStore::failing(AcronymStore::new());
        assert!(failing.save(&store).is_err());
        assert_eq!(failing.save_count(), 0);
        assert!(failing.saved().is_empty());
    }
}
