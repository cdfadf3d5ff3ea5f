//! Case Adapter
//!
//! Lower-cases an inserted term when the replaced word was typed in lower
//! case, unless the term looks like an acronym (second letter upper-case).

/// Adapt `candidate` to the capitalization of the word it replaces.
///
/// `first` is the first character of the replaced span.
pub fn adapt(first: char, candidate: &str) -> String {
    let second = candidate.chars().nth(1);

    match second {
        Some(second) if first.is_lowercase() && second.is_lowercase() => candidate.to_lowercase(),
        _ => candidate.to_string(),
    }
}
