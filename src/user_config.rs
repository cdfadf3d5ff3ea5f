// termdict Configuration
// Edit this file to change the compiled-in defaults

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // =========================================================================
    // TERM STORE
    // =========================================================================
    // Folder (relative to the vault root) holding one record per term.
    // Created on startup if it does not exist yet.
    config.set("dictionary_root", "Dictionary");

    // Records are named "<term>.<extension>"; the extension is stripped to
    // obtain the term name.
    config.set("record_extension", "md");

    // =========================================================================
    // SUGGESTIONS
    // =========================================================================
    // Rows shown for an existing-term lookup
    config.set("lookup_limit", 4);
    // Rows shown for an inline definition
    config.set("definition_limit", 5);

    // Inline definition syntax: !!!Term: description!!!
    config.set("definition_marker", "!!!");

    // When true, characters such as '.', '*' or '(' in the typed word are
    // matched literally. When false, the typed word is used as a regular
    // expression and an invalid pattern simply yields no suggestions.
    config.set("literal_queries", true);
}
