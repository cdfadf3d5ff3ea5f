//! Term Store
//!
//! The external, folder-based store that holds one record per term. Paths
//! are `/`-separated and relative to the store's root directory, e.g.
//! `Dictionary/Physics/Entropy.md`.
//!
//! Stores notify subscribed listeners when records appear or move. The
//! listener list is walked on the calling thread; nothing here is `Send`.

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{DictionaryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    Record,
}

/// One item found while enumerating the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub path: String,
    pub kind: EntryKind,
}

/// Change notification emitted by a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created(String),
    Renamed { old: String, new: String },
    Deleted(String),
}

/// Receiver of store notifications
pub trait StoreListener {
    fn on_event(&mut self, event: &StoreEvent);
}

pub type SharedListener = Rc<RefCell<dyn StoreListener>>;

/// Operations the suggestion core needs from a term store
pub trait TermStore {
    /// Every folder and record under `root`, depth first
    fn list_recursive(&self, root: &str) -> Result<Vec<StoreEntry>>;

    fn folder_exists(&self, path: &str) -> bool;

    /// Create the folder and any missing parents
    fn create_folder(&self, path: &str) -> Result<()>;

    /// Create a record holding `body`. Fails if the record already exists.
    fn create_record(&self, path: &str, body: &str) -> Result<()>;

    fn subscribe(&self, listener: SharedListener);
}

/// Join store path segments, skipping empty ones
pub fn join_path(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|part| part.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Term store backed by a directory on disk
pub struct FolderStore {
    root: PathBuf,
    listeners: RefCell<Vec<SharedListener>>,
}

impl std::fmt::Debug for FolderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderStore")
            .field("root", &self.root)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl FolderStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a store path onto the filesystem.
    ///
    /// `.` and `..` segments are dropped so a path can never leave the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !matches!(*segment, "" | "." | ".."))
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    /// Deliver `event` to every listener.
    ///
    /// Hosts that watch the directory themselves call this to forward
    /// changes made outside the store.
    pub fn emit(&self, event: StoreEvent) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut listener) => listener.on_event(&event),
                Err(_) => warn!(target: "termdict", ?event, "listener busy, event dropped"),
            }
        }
    }

    /// Move a record and notify listeners
    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        let from = self.resolve(old);
        let to = self.resolve(new);
        fs::rename(&from, &to).map_err(|e| DictionaryError::io(&from, e))?;
        self.emit(StoreEvent::Renamed {
            old: join_path(&[old]),
            new: join_path(&[new]),
        });
        Ok(())
    }

    /// Remove a record and notify listeners
    pub fn delete(&self, path: &str) -> Result<()> {
        let target = self.resolve(path);
        fs::remove_file(&target).map_err(|e| DictionaryError::io(&target, e))?;
        self.emit(StoreEvent::Deleted(join_path(&[path])));
        Ok(())
    }

    fn collect(&self, dir: &Path, prefix: &str, out: &mut Vec<StoreEntry>) -> Result<()> {
        let mut children = fs::read_dir(dir)
            .map_err(|e| DictionaryError::io(dir, e))?
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| DictionaryError::io(dir, e))?;
        children.sort_by_key(|entry| entry.file_name());

        for child in children {
            let name = child.file_name().to_string_lossy().into_owned();
            let path = format!("{prefix}/{name}");
            let file_type = child
                .file_type()
                .map_err(|e| DictionaryError::io(child.path(), e))?;

            if file_type.is_dir() {
                out.push(StoreEntry {
                    path: path.clone(),
                    kind: EntryKind::Folder,
                });
                self.collect(&child.path(), &path, out)?;
            } else if file_type.is_file() {
                out.push(StoreEntry {
                    path,
                    kind: EntryKind::Record,
                });
            }
        }
        Ok(())
    }
}

impl TermStore for FolderStore {
    fn list_recursive(&self, root: &str) -> Result<Vec<StoreEntry>> {
        let prefix = join_path(&[root]);
        let dir = self.resolve(&prefix);
        if !dir.is_dir() {
            return Err(DictionaryError::NotAFolder(prefix));
        }

        let mut entries = Vec::new();
        self.collect(&dir, &prefix, &mut entries)?;
        Ok(entries)
    }

    fn folder_exists(&self, path: &str) -> bool {
        self.resolve(path).is_dir()
    }

    fn create_folder(&self, path: &str) -> Result<()> {
        let dir = self.resolve(path);
        if dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&dir).map_err(|e| DictionaryError::io(&dir, e))?;
        debug!(target: "termdict", path, "created folder");
        self.emit(StoreEvent::Created(join_path(&[path])));
        Ok(())
    }

    fn create_record(&self, path: &str, body: &str) -> Result<()> {
        let target = self.resolve(path);
        let parent = target.parent().unwrap_or(&self.root);

        // Write to temp file first so a half-written record never shows up
        let mut temp_file =
            NamedTempFile::new_in(parent).map_err(|e| DictionaryError::io(parent, e))?;
        temp_file
            .write_all(body.as_bytes())
            .map_err(|e| DictionaryError::io(temp_file.path(), e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| DictionaryError::io(temp_file.path(), e))?;

        temp_file.persist_noclobber(&target).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                DictionaryError::RecordExists(join_path(&[path]))
            } else {
                DictionaryError::io(&target, e.error)
            }
        })?;

        debug!(target: "termdict", path, "created record");
        self.emit(StoreEvent::Created(join_path(&[path])));
        Ok(())
    }

    fn subscribe(&self, listener: SharedListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recorder {
        events: Vec<StoreEvent>,
    }

    impl StoreListener for Recorder {
        fn on_event(&mut self, event: &StoreEvent) {
            self.events.push(event.clone());
        }
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(&["Dictionary", "a/b", "Foo.md"]), "Dictionary/a/b/Foo.md");
        assert_eq!(join_path(&["/Dictionary/", "", "x"]), "Dictionary/x");
    }

    #[test]
    fn test_resolve_stays_inside_root() {
        let store = FolderStore::new("/vault");
        assert_eq!(store.resolve("../etc/./passwd"), PathBuf::from("/vault/etc/passwd"));
    }

    #[test]
    fn test_list_recursive() {
        let dir = tempdir().unwrap();
        let store = FolderStore::new(dir.path());
        store.create_folder("Dictionary/Sub").unwrap();
        store.create_record("Dictionary/Apple.md", "fruit").unwrap();
        store.create_record("Dictionary/Sub/Banana.md", "also fruit").unwrap();

        let entries = store.list_recursive("Dictionary").unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["Dictionary/Apple.md", "Dictionary/Sub", "Dictionary/Sub/Banana.md"]
        );
        assert_eq!(entries[1].kind, EntryKind::Folder);
    }

    #[test]
    fn test_list_missing_root() {
        let dir = tempdir().unwrap();
        let store = FolderStore::new(dir.path());
        assert!(matches!(
            store.list_recursive("Dictionary"),
            Err(DictionaryError::NotAFolder(_))
        ));
    }

    #[test]
    fn test_create_record_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let store = FolderStore::new(dir.path());
        store.create_folder("Dictionary").unwrap();
        store.create_record("Dictionary/Foo.md", "first").unwrap();

        let err = store.create_record("Dictionary/Foo.md", "second").unwrap_err();
        assert!(matches!(err, DictionaryError::RecordExists(p) if p == "Dictionary/Foo.md"));
        let body = fs::read_to_string(dir.path().join("Dictionary/Foo.md")).unwrap();
        assert_eq!(body, "first");
    }

    #[test]
    fn test_create_record_missing_parent() {
        let dir = tempdir().unwrap();
        let store = FolderStore::new(dir.path());
        assert!(matches!(
            store.create_record("Nowhere/Foo.md", "x"),
            Err(DictionaryError::Io { .. })
        ));
    }

    #[test]
    fn test_events_reach_listeners() {
        let dir = tempdir().unwrap();
        let store = FolderStore::new(dir.path());
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        store.subscribe(recorder.clone());

        store.create_folder("Dictionary").unwrap();
        store.create_folder("Dictionary").unwrap();
        store.create_record("Dictionary/Old.md", "x").unwrap();
        store.rename("Dictionary/Old.md", "Dictionary/New.md").unwrap();
        store.delete("Dictionary/New.md").unwrap();

        assert_eq!(
            recorder.borrow().events,
            vec![
                StoreEvent::Created("Dictionary".to_string()),
                StoreEvent::Created("Dictionary/Old.md".to_string()),
                StoreEvent::Renamed {
                    old: "Dictionary/Old.md".to_string(),
                    new: "Dictionary/New.md".to_string(),
                },
                StoreEvent::Deleted("Dictionary/New.md".to_string()),
            ]
        );
    }
}
