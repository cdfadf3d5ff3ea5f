//! Editor Suggest
//!
//! Common shape of the two suggestion providers: detect a trigger under
//! the cursor, compute suggestions, render rows, and apply the accepted
//! row to the buffer.

use super::boundary::TriggerContext;
use super::editor::{ActiveDocument, Position, TextBuffer};
use crate::error::Result;

/// A trigger context anchored to a buffer line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub line: usize,
    pub context: TriggerContext,
}

impl Trigger {
    pub fn new(line: usize, context: TriggerContext) -> Self {
        Self { line, context }
    }

    pub fn from(&self) -> Position {
        Position::new(self.line, self.context.start)
    }

    pub fn to(&self) -> Position {
        Position::new(self.line, self.context.end)
    }

    pub fn query(&self) -> &str {
        &self.context.query
    }
}

pub trait EditorSuggest {
    /// Maximum number of rows shown
    fn limit(&self) -> usize;

    /// Inspect the line under `cursor`; `None` when this provider does not apply
    fn trigger<B: TextBuffer + ?Sized>(&self, cursor: Position, buffer: &B) -> Option<Trigger>;

    /// Candidates for the trigger, best first. Runs to completion once
    /// polled; callers drop the result if the trigger went stale.
    fn get_suggestions(&self, trigger: &Trigger) -> impl Future<Output = Vec<String>>;

    /// Text of the row shown for `value`
    fn render_suggestion(&self, value: &str) -> String;

    /// Apply the accepted `value` to the buffer
    fn select_suggestion<B: TextBuffer + ActiveDocument + ?Sized>(
        &self,
        value: &str,
        trigger: &Trigger,
        editor: &mut B,
    ) -> Result<()>;
}
