//! Edit Distance
//!
//! Levenshtein distance used to rank term candidates against the typed word.
//! Inputs are single words, so the full table is kept.

/// Minimum number of single-character insertions, deletions or
/// substitutions needed to turn `first` into `second`.
///
/// Characters are compared as Unicode scalar values.
pub fn distance(first: &str, second: &str) -> usize {
    let first: Vec<char> = first.chars().collect();
    let second: Vec<char> = second.chars().collect();

    if first.is_empty() || second.is_empty() {
        return first.len().abs_diff(second.len());
    }

    // table[i][j]: distance between the first i chars of `second`
    // and the first j chars of `first`
    let mut table = vec![vec![0usize; first.len() + 1]; second.len() + 1];

    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=second.len() {
        for j in 1..=first.len() {
            table[i][j] = if second[i - 1] == first[j - 1] {
                table[i - 1][j - 1]
            } else {
                1 + table[i - 1][j - 1] // substitution
                    .min(table[i][j - 1]) // insertion
                    .min(table[i - 1][j]) // deletion
            };
        }
    }

    table[second.len()][first.len()]
}
