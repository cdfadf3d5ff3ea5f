//! Term Lookup
//!
//! Suggests known terms for the word under the cursor. Matching is
//! case-insensitive and by substring; candidates are ranked by edit
//! distance to the typed word. Accepting a row turns the word into a
//! `[[Term]]` link.

use regex::Regex;
use tracing::debug;

use super::boundary;
use super::case;
use super::distance::distance;
use super::editor::{ActiveDocument, Position, TextBuffer};
use super::repository::SharedRepository;
use super::suggest::{EditorSuggest, Trigger};
use crate::config::Settings;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct LookupSuggest {
    repository: SharedRepository,
    limit: usize,
    /// Escape regex metacharacters in the typed word
    literal: bool,
}

impl LookupSuggest {
    pub fn new(repository: SharedRepository, settings: &Settings) -> Self {
        Self {
            repository,
            limit: settings.lookup_limit,
            literal: settings.literal_queries,
        }
    }

    /// Upper-cased search pattern for `query`
    pub fn compile_query(&self, query: &str) -> Result<Regex> {
        let upper = query.to_uppercase();
        let pattern = if self.literal {
            regex::escape(&upper)
        } else {
            upper
        };
        Ok(Regex::new(&pattern)?)
    }

    /// Every matching term, closest first. Ties keep repository order.
    pub fn rank(&self, query: &str) -> Result<Vec<String>> {
        let pattern = self.compile_query(query)?;
        let query = query.to_uppercase();
        let repository = self.repository.borrow();

        let mut matches: Vec<(String, &String)> = repository
            .terms()
            .iter()
            .map(|term| (term.to_uppercase(), term))
            .filter(|(upper, _)| pattern.is_match(upper))
            .collect();
        matches.sort_by_cached_key(|(upper, _)| distance(upper, &query));

        Ok(matches.into_iter().map(|(_, term)| term.clone()).collect())
    }
}

impl EditorSuggest for LookupSuggest {
    fn limit(&self) -> usize {
        self.limit
    }

    fn trigger<B: TextBuffer + ?Sized>(&self, cursor: Position, buffer: &B) -> Option<Trigger> {
        let line = buffer.line(cursor.line)?;
        boundary::scan(&line, cursor.ch).map(|context| Trigger::new(cursor.line, context))
    }

    fn get_suggestions(&self, trigger: &Trigger) -> impl Future<Output = Vec<String>> {
        let query = trigger.query().to_string();
        async move {
            match self.rank(&query) {
                Ok(terms) => terms,
                Err(e) => {
                    debug!(target: "termdict", query = query.as_str(), error = %e, "no lookup suggestions");
                    Vec::new()
                }
            }
        }
    }

    fn render_suggestion(&self, value: &str) -> String {
        value.to_string()
    }

    fn select_suggestion<B: TextBuffer + ActiveDocument + ?Sized>(
        &self,
        value: &str,
        trigger: &Trigger,
        editor: &mut B,
    ) -> Result<()> {
        let term = match trigger.query().chars().next() {
            Some(first) => case::adapt(first, value),
            None => value.to_string(),
        };
        editor.replace_range(&format!("[[{term}]]"), trigger.from(), trigger.to())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::boundary::TriggerContext;
    use crate::core::buffer::Buffer;
    use crate::core::repository::{RecordNaming, TermRepository};
    use crate::error::DictionaryError;

    fn lookup(terms: &[&str], literal: bool) -> LookupSuggest {
        let mut repository = TermRepository::new(RecordNaming::new("Dictionary", "md"));
        for term in terms {
            repository.insert(*term);
        }
        let settings = Settings {
            literal_queries: literal,
            ..Settings::default()
        };
        LookupSuggest::new(repository.shared(), &settings)
    }

    fn trigger(query: &str, start: usize) -> Trigger {
        Trigger::new(
            0,
            TriggerContext {
                start,
                end: start + query.chars().count(),
                query: query.to_string(),
            },
        )
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let lookup = lookup(&["Applesauce", "Banana", "Apple"], true);
        assert_eq!(lookup.rank("appl").unwrap(), vec!["Apple", "Applesauce"]);
    }

    #[test]
    fn test_rank_substring_anywhere() {
        let lookup = lookup(&["Pineapple", "Apple", "Grape"], true);
        assert_eq!(lookup.rank("APPLE").unwrap(), vec!["Apple", "Pineapple"]);
    }

    #[test]
    fn test_rank_ties_are_stable() {
        let lookup = lookup(&["Cat", "Bat", "Rat"], true);
        assert_eq!(lookup.rank("at").unwrap(), vec!["Cat", "Bat", "Rat"]);
    }

    #[test]
    fn test_literal_query_escapes_metacharacters() {
        let lookup = lookup(&["C++", "CPP", "C"], true);
        assert_eq!(lookup.rank("c++").unwrap(), vec!["C++"]);
        assert!(lookup.rank("a(b").unwrap().is_empty());
    }

    #[test]
    fn test_pattern_query() {
        let lookup = lookup(&["Colour", "Color", "Cooler"], false);
        assert_eq!(lookup.rank("colou?r").unwrap(), vec!["Colour", "Color"]);
        assert!(matches!(
            lookup.rank("a(b"),
            Err(DictionaryError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_get_suggestions_swallows_bad_pattern() {
        let lookup = lookup(&["Anything"], false);
        let suggestions = pollster::block_on(lookup.get_suggestions(&trigger("a(b", 0)));
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_trigger_reads_cursor_line() {
        let lookup = lookup(&[], true);
        let buffer = Buffer::from_string("first line\nthe dog");
        let found = lookup.trigger(Position::new(1, 7), &buffer).unwrap();
        assert_eq!(found.line, 1);
        assert_eq!(found.query(), "dog");
        assert_eq!((found.from(), found.to()), (Position::new(1, 4), Position::new(1, 7)));
        assert_eq!(lookup.trigger(Position::new(5, 0), &buffer), None);
    }

    #[test]
    fn test_select_adapts_case() {
        let lookup = lookup(&["Dog", "DNA"], true);

        let mut buffer = Buffer::from_string("the dog");
        lookup
            .select_suggestion("Dog", &trigger("dog", 4), &mut buffer)
            .unwrap();
        assert_eq!(buffer.to_string(), "the [[dog]]");

        let mut buffer = Buffer::from_string("the dn");
        lookup
            .select_suggestion("DNA", &trigger("dn", 4), &mut buffer)
            .unwrap();
        assert_eq!(buffer.to_string(), "the [[DNA]]");
    }

    #[test]
    fn test_render_and_limit() {
        let lookup = lookup(&[], true);
        assert_eq!(lookup.render_suggestion("Apple"), "Apple");
        assert_eq!(lookup.limit(), 4);
    }
}
