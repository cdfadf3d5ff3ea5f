//! Term Repository
//!
//! In-memory mirror of the term names found in the term store. It is built
//! once from a recursive listing and then kept current by store events.
//! Deletions are not propagated: a term whose record was removed stays
//! suggestible until the next full load.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::store::{EntryKind, StoreEntry, StoreEvent, StoreListener};

pub type SharedRepository = Rc<RefCell<TermRepository>>;

/// How store paths map to term names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordNaming {
    root: String,
    extension: String,
}

impl RecordNaming {
    pub fn new(root: &str, extension: &str) -> Self {
        Self {
            root: root.trim_matches('/').to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// True when `path` lies strictly below the root folder
    pub fn is_under_root(&self, path: &str) -> bool {
        path.strip_prefix(self.root.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Term name of a record path: its file name without the extension.
    ///
    /// Returns `None` for paths that do not carry the record extension.
    pub fn term_name<'a>(&self, path: &'a str) -> Option<&'a str> {
        let file_name = path.rsplit('/').next()?;
        let stem = file_name.strip_suffix(self.extension.as_str())?;
        stem.strip_suffix('.').filter(|name| !name.is_empty())
    }

    /// Record file name for a term
    pub fn record_file_name(&self, term: &str) -> String {
        format!("{term}.{}", self.extension)
    }

    fn term_in_root<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.is_under_root(path) {
            self.term_name(path)
        } else {
            None
        }
    }
}

/// The set of known terms, in insertion order
#[derive(Debug, Clone)]
pub struct TermRepository {
    naming: RecordNaming,
    terms: Vec<String>,
}

impl TermRepository {
    pub fn new(naming: RecordNaming) -> Self {
        Self {
            naming,
            terms: Vec::new(),
        }
    }

    /// Build from a recursive store listing, skipping folders and
    /// files that are not records
    pub fn from_entries<'a>(
        naming: RecordNaming,
        entries: impl IntoIterator<Item = &'a StoreEntry>,
    ) -> Self {
        let mut repository = Self::new(naming);
        for entry in entries {
            if entry.kind != EntryKind::Record {
                continue;
            }
            if let Some(term) = repository.naming.term_name(&entry.path) {
                repository.insert(term);
            }
        }
        repository
    }

    pub fn shared(self) -> SharedRepository {
        Rc::new(RefCell::new(self))
    }

    /// Add a term; returns false if it was already known
    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.contains(&term) {
            return false;
        }
        self.terms.push(term);
        true
    }

    /// Remove a term; returns false if it was not known
    pub fn remove(&mut self, term: &str) -> bool {
        match self.terms.iter().position(|t| t == term) {
            Some(index) => {
                self.terms.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// A record appeared in the store
    pub fn on_created(&mut self, path: &str) {
        let Some(term) = self.naming.term_in_root(path) else {
            debug!(target: "termdict", path, "created path is not a term record");
            return;
        };
        if self.insert(term) {
            debug!(target: "termdict", term, "term added");
        }
    }

    /// A record moved. The old name goes before the new one is added.
    pub fn on_renamed(&mut self, old: &str, new: &str) {
        let old_term = self.naming.term_in_root(old);
        let new_term = self.naming.term_in_root(new);
        if old_term == new_term {
            return;
        }

        if let Some(term) = old_term {
            if self.remove(term) {
                debug!(target: "termdict", term, "term removed");
            }
        }
        if let Some(term) = new_term {
            if self.insert(term) {
                debug!(target: "termdict", term, "term added");
            }
        }
    }
}

impl StoreListener for TermRepository {
    fn on_event(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::Created(path) => self.on_created(path),
            StoreEvent::Renamed { old, new } => self.on_renamed(old, new),
            StoreEvent::Deleted(path) => {
                debug!(target: "termdict", path = path.as_str(), "deletions are not propagated");
            }
        }
    }
}
