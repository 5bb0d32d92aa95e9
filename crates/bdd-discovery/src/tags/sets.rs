//! Tag-set merging used when pickles inherit tags from enclosing nodes.

use std::collections::HashSet;

fn normalise(tag: &str) -> String {
    let trimmed = tag.trim();
    if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{trimmed}")
    }
}

/// Merge tag lists in order, normalising to `@tag` and dropping repeats.
///
/// The `gherkin` crate strips the leading `@` from parsed tags while tag
/// expressions keep it, so every entry is normalised on the way in.
pub(crate) fn merge_tag_sets<'a, I>(layers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for tag in layers.into_iter().flatten() {
        let formatted = normalise(tag);
        if seen.insert(formatted.clone()) {
            merged.push(formatted);
        }
    }
    merged
}
