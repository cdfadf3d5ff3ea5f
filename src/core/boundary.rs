//! Boundary Scanner
//!
//! Locates the editable span under the cursor. Two shapes are recognized:
//! a plain word delimited by [`SEPARATORS`], and an inline definition
//! wrapped in a marker (`!!!Term: description!!!`).
//!
//! All offsets are `char` columns within a single line.

/// Characters that terminate a word
pub const SEPARATORS: &[char] = &[
    ' ', '\t', '.', '!', '?', '#', '$', '@', '%', '^', '&', '*', '(', ')', '[', ']', '{', '}',
    ';', ':', '\'', '"', ',', '/', '<', '>', '~', '`', '+',
];

/// Separates the term name from its description inside a definition
pub const DEFINITION_SEPARATOR: &str = ": ";

/// Span and text detected under the cursor for one keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    /// First column of the span
    pub start: usize,
    /// Column one past the end of the span
    pub end: usize,
    /// Text used to look up suggestions
    pub query: String,
}

pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Find the word around `cursor` in `line`.
///
/// Returns `None` when the line is empty, when the character before the
/// cursor is a separator, or when the word is shorter than two characters.
pub fn scan(line: &str, cursor: usize) -> Option<TriggerContext> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let cursor = cursor.min(chars.len());
    if cursor > 0 && is_separator(chars[cursor - 1]) {
        return None;
    }

    let start = chars[..cursor]
        .iter()
        .rposition(|&c| is_separator(c))
        .map_or(0, |i| i + 1);
    let end = chars[cursor..]
        .iter()
        .position(|&c| is_separator(c))
        .map_or(chars.len(), |i| cursor + i);

    if end - start <= 1 {
        return None;
    }

    Some(TriggerContext {
        start,
        end,
        query: chars[start..end].iter().collect(),
    })
}

/// Find an inline definition `<marker><term>: <description><marker>` in `line`.
///
/// The returned span covers both markers; the query is the body between
/// them. Only the first marker pair on the line is considered, and the
/// cursor position does not matter.
pub fn scan_definition(line: &str, marker: &str) -> Option<TriggerContext> {
    if marker.is_empty() || line.chars().count() <= 2 * marker.chars().count() {
        return None;
    }

    let open = line.find(marker)?;
    let body_start = open + marker.len();
    let close = body_start + line[body_start..].find(marker)?;
    let body = &line[body_start..close];

    let (name, description) = body.split_once(DEFINITION_SEPARATOR)?;
    if name.is_empty() || description.is_empty() {
        return None;
    }

    Some(TriggerContext {
        start: char_column(line, open),
        end: char_column(line, close + marker.len()),
        query: body.to_string(),
    })
}

/// Split a definition body into `(name, description)`
pub fn split_definition(query: &str) -> Option<(&str, &str)> {
    query
        .split_once(DEFINITION_SEPARATOR)
        .filter(|(name, description)| !name.is_empty() && !description.is_empty())
}

fn char_column(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_at_end_of_word() {
        let ctx = scan("hello world", 5).unwrap();
        assert_eq!((ctx.start, ctx.end), (0, 5));
        assert_eq!(ctx.query, "hello");
    }

    #[test]
    fn test_word_mid_word() {
        let ctx = scan("say hello, world", 6).unwrap();
        assert_eq!((ctx.start, ctx.end), (4, 9));
        assert_eq!(ctx.query, "hello");
    }

    #[test]
    fn test_word_last_on_line() {
        let ctx = scan("the quick fox", 13).unwrap();
        assert_eq!((ctx.start, ctx.end), (10, 13));
        assert_eq!(ctx.query, "fox");
    }

    #[test]
    fn test_rejects_after_separator() {
        assert_eq!(scan("a. b", 3), None);
        assert_eq!(scan("hello ", 6), None);
        assert_eq!(scan("(x", 1), None);
    }

    #[test]
    fn test_rejects_short_or_empty() {
        assert_eq!(scan("", 0), None);
        assert_eq!(scan("a. b", 4), None);
        assert_eq!(scan("x", 1), None);
    }

    #[test]
    fn test_cursor_past_end_is_clamped() {
        let ctx = scan("word", 99).unwrap();
        assert_eq!(ctx.query, "word");
    }

    #[test]
    fn test_columns_are_chars() {
        let ctx = scan("über größe", 10).unwrap();
        assert_eq!((ctx.start, ctx.end), (5, 10));
        assert_eq!(ctx.query, "größe");
    }

    #[test]
    fn test_definition() {
        let line = "text !!!Foo: a bar!!! end";
        let ctx = scan_definition(line, "!!!").unwrap();
        assert_eq!(ctx.query, "Foo: a bar");
        assert_eq!((ctx.start, ctx.end), (5, 21));
        assert_eq!(&line[ctx.start..ctx.end], "!!!Foo: a bar!!!");
    }

    #[test]
    fn test_definition_rejections() {
        // unterminated
        assert_eq!(scan_definition("text !!!Foo: a bar", "!!!"), None);
        // empty body
        assert_eq!(scan_definition("text !!!!!! end", "!!!"), None);
        // no separator inside the markers
        assert_eq!(scan_definition("text !!!Foo bar!!!: x", "!!!"), None);
        // empty description
        assert_eq!(scan_definition("text !!!Foo: !!! end", "!!!"), None);
        // empty name
        assert_eq!(scan_definition("text !!!: bar!!! end", "!!!"), None);
        // too short to hold two markers
        assert_eq!(scan_definition("!!!!!!", "!!!"), None);
    }

    #[test]
    fn test_split_definition() {
        assert_eq!(
            split_definition("Foo: a bar: baz"),
            Some(("Foo", "a bar: baz"))
        );
        assert_eq!(split_definition("Foo:bar"), None);
    }
}
