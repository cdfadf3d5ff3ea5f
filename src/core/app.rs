//! Dictionary application context
//!
//! Owns the term repository, the store handle, both suggestion providers
//! and the notifier, and runs the per-keystroke pipeline:
//! trigger → suggestions → render → accept.

use std::rc::Rc;

use tracing::{info, warn};

use super::definition::DefinitionSuggest;
use super::editor::{ActiveDocument, TextBuffer};
use super::lookup::LookupSuggest;
use super::notice::Notifier;
use super::repository::{RecordNaming, SharedRepository, TermRepository};
use super::store::TermStore;
use super::suggest::{EditorSuggest, Trigger};
use crate::config::{Config, Settings};
use crate::error::{DictionaryError, Result};

/// Which provider produced a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestMode {
    Lookup,
    Definition,
}

/// A trigger that is waiting for suggestions or for acceptance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSuggest {
    pub mode: SuggestMode,
    pub trigger: Trigger,
}

/// Suggestions computed for one trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionList {
    pub mode: SuggestMode,
    pub items: Vec<String>,
    limit: usize,
}

impl SuggestionList {
    /// The rows that are shown, capped at the provider's limit
    pub fn visible(&self) -> &[String] {
        &self.items[..self.items.len().min(self.limit)]
    }
}

pub struct DictionaryApp<S: TermStore> {
    settings: Settings,
    store: Rc<S>,
    repository: SharedRepository,
    lookup: LookupSuggest,
    definition: DefinitionSuggest<S>,
    notifier: Rc<dyn Notifier>,
}

impl<S: TermStore> std::fmt::Debug for DictionaryApp<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryApp")
            .field("settings", &self.settings)
            .field("terms", &self.repository.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<S: TermStore> DictionaryApp<S> {
    /// Bootstrap from the store.
    ///
    /// Creates the dictionary root when missing, loads every record below
    /// it, and subscribes the repository to store notifications.
    pub fn load(store: S, config: &Config, notifier: Rc<dyn Notifier>) -> Result<Self> {
        let settings = Settings::from_config(config);
        let naming = RecordNaming::new(&settings.dictionary_root, &settings.record_extension);
        let store = Rc::new(store);

        if !store.folder_exists(naming.root()) {
            store.create_folder(naming.root())?;
        }
        let entries = store.list_recursive(naming.root())?;
        let repository = TermRepository::from_entries(naming.clone(), &entries).shared();
        store.subscribe(repository.clone());

        info!(
            target: "termdict",
            root = naming.root(),
            terms = repository.borrow().len(),
            "dictionary loaded"
        );

        let lookup = LookupSuggest::new(repository.clone(), &settings);
        let definition =
            DefinitionSuggest::new(store.clone(), naming, &settings, notifier.clone());

        Ok(Self {
            settings,
            store,
            repository,
            lookup,
            definition,
            notifier,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn repository(&self) -> SharedRepository {
        self.repository.clone()
    }

    /// Detect a trigger at the buffer's cursor. Lookup wins over definition.
    pub fn trigger<B: TextBuffer + ?Sized>(&self, buffer: &B) -> Option<ActiveSuggest> {
        let cursor = buffer.cursor();
        if let Some(trigger) = self.lookup.trigger(cursor, buffer) {
            return Some(ActiveSuggest {
                mode: SuggestMode::Lookup,
                trigger,
            });
        }
        self.definition
            .trigger(cursor, buffer)
            .map(|trigger| ActiveSuggest {
                mode: SuggestMode::Definition,
                trigger,
            })
    }

    pub async fn suggestions(&self, active: &ActiveSuggest) -> SuggestionList {
        let (items, limit) = match active.mode {
            SuggestMode::Lookup => (
                self.lookup.get_suggestions(&active.trigger).await,
                self.lookup.limit(),
            ),
            SuggestMode::Definition => (
                self.definition.get_suggestions(&active.trigger).await,
                self.definition.limit(),
            ),
        };
        SuggestionList {
            mode: active.mode,
            items,
            limit,
        }
    }

    /// Row texts for the visible suggestions
    pub fn render(&self, list: &SuggestionList) -> Vec<String> {
        list.visible()
            .iter()
            .map(|value| match list.mode {
                SuggestMode::Lookup => self.lookup.render_suggestion(value),
                SuggestMode::Definition => self.definition.render_suggestion(value),
            })
            .collect()
    }

    /// Whether `active` still matches what the buffer shows now
    pub fn still_active<B: TextBuffer + ?Sized>(&self, active: &ActiveSuggest, buffer: &B) -> bool {
        self.trigger(buffer).as_ref() == Some(active)
    }

    /// Trigger and compute suggestions in one step, blocking on the
    /// suggestion future
    pub fn complete_at_cursor<B: TextBuffer + ?Sized>(
        &self,
        buffer: &B,
    ) -> Option<(ActiveSuggest, SuggestionList)> {
        let active = self.trigger(buffer)?;
        let list = pollster::block_on(self.suggestions(&active));
        Some((active, list))
    }

    /// Apply an accepted suggestion.
    ///
    /// Failures are reported to the notifier and returned. The buffer is
    /// left untouched when the trigger has gone stale or the store rejects
    /// a new term.
    pub fn accept<B: TextBuffer + ActiveDocument + ?Sized>(
        &self,
        active: &ActiveSuggest,
        value: &str,
        buffer: &mut B,
    ) -> Result<()> {
        let result = if !self.still_active(active, buffer) {
            Err(DictionaryError::StaleTrigger(active.trigger.query().to_string()))
        } else {
            match active.mode {
                SuggestMode::Lookup => {
                    self.lookup.select_suggestion(value, &active.trigger, buffer)
                }
                SuggestMode::Definition => {
                    self.definition
                        .select_suggestion(value, &active.trigger, buffer)
                }
            }
        };

        if let Err(e) = &result {
            warn!(target: "termdict", value, error = %e, "suggestion not applied");
            self.notifier.notify(&format!("Could not insert {value}: {e}"));
        }
        result
    }
}
