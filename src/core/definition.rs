//! Inline Term Definition
//!
//! `!!!Term: description!!!` typed anywhere on a line offers to create
//! the term. Accepting writes a record named after the term into a folder
//! that mirrors the current document's path under the dictionary root,
//! then replaces the whole marked span with `[[Term]]`.
//!
//! The repository learns about the new term through the store's creation
//! notification, not from this provider.

use std::rc::Rc;

use tracing::info;

use super::boundary;
use super::editor::{ActiveDocument, Position, TextBuffer};
use super::notice::Notifier;
use super::repository::RecordNaming;
use super::store::{TermStore, join_path};
use super::suggest::{EditorSuggest, Trigger};
use crate::config::Settings;
use crate::error::{DictionaryError, Result};

pub struct DefinitionSuggest<S> {
    store: Rc<S>,
    naming: RecordNaming,
    marker: String,
    limit: usize,
    notifier: Rc<dyn Notifier>,
}

impl<S> std::fmt::Debug for DefinitionSuggest<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionSuggest")
            .field("naming", &self.naming)
            .field("marker", &self.marker)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<S: TermStore> DefinitionSuggest<S> {
    pub fn new(
        store: Rc<S>,
        naming: RecordNaming,
        settings: &Settings,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            naming,
            marker: settings.definition_marker.clone(),
            limit: settings.definition_limit,
            notifier,
        }
    }

    /// Folder receiving terms defined in `document_path`:
    /// `<root>/<document path without extension>`
    pub fn target_folder(&self, document_path: &str) -> String {
        join_path(&[self.naming.root(), strip_extension(document_path)])
    }

    /// Create the record for `name` and return its store path
    fn create_term(&self, document_path: &str, name: &str, description: &str) -> Result<String> {
        let folder = self.target_folder(document_path);
        if !self.store.folder_exists(&folder) {
            self.store.create_folder(&folder)?;
        }

        let file_name = self.naming.record_file_name(name);
        let record = join_path(&[folder.as_str(), file_name.as_str()]);
        self.store.create_record(&record, description)?;
        info!(target: "termdict", term = name, record = record.as_str(), "term defined");
        Ok(record)
    }
}

impl<S: TermStore> EditorSuggest for DefinitionSuggest<S> {
    fn limit(&self) -> usize {
        self.limit
    }

    fn trigger<B: TextBuffer + ?Sized>(&self, cursor: Position, buffer: &B) -> Option<Trigger> {
        let line = buffer.line(cursor.line)?;
        boundary::scan_definition(&line, &self.marker)
            .map(|context| Trigger::new(cursor.line, context))
    }

    fn get_suggestions(&self, trigger: &Trigger) -> impl Future<Output = Vec<String>> {
        let query = trigger.query().to_string();
        async move { vec![query] }
    }

    fn render_suggestion(&self, value: &str) -> String {
        let name = value
            .split_once(boundary::DEFINITION_SEPARATOR)
            .map_or(value, |(name, _)| name);
        format!("Create Term: {name}")
    }

    fn select_suggestion<B: TextBuffer + ActiveDocument + ?Sized>(
        &self,
        value: &str,
        trigger: &Trigger,
        editor: &mut B,
    ) -> Result<()> {
        let (name, description) = boundary::split_definition(value)
            .filter(|(name, _)| !name.contains(['/', '\\']))
            .ok_or_else(|| DictionaryError::InvalidDefinition(value.to_string()))?;
        let document_path = editor
            .document_path()
            .ok_or(DictionaryError::NoActiveDocument)?
            .to_string();

        let record = self.create_term(&document_path, name, description)?;
        self.notifier.notify(&format!("Created term: {record}"));

        editor.replace_range(&format!("[[{name}]]"), trigger.from(), trigger.to())
    }
}

/// Drop the extension from the last segment of a store path
fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..file_start + dot],
        _ => path,
    }
}
