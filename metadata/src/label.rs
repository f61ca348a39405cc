//! # Label Resolution
//!
//! Attaches human-readable labels to descriptors. Explicit labels are kept
//! as declared; descriptors without one get a label derived from the final
//! path segment (`maxPoolSize` becomes `Max pool size`).

use crate::descriptor::ConfigGroup;

/// Resolve labels for every descriptor in the given groups.
///
/// Explicit labels are trimmed and kept. Missing or blank labels are
/// replaced with [`default_label`].
pub fn resolve_labels(groups: Vec<ConfigGroup>) -> Vec<ConfigGroup> {
    groups
        .into_iter()
        .map(|mut group| {
            for descriptor in &mut group.descriptors {
                descriptor.label = Some(resolve(descriptor.label.as_deref(), &descriptor.path));
            }
            group
        })
        .collect()
}

fn resolve(explicit: Option<&str>, path: &str) -> String {
    match explicit.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => default_label(path),
    }
}

/// Derive a label from the last segment of a dotted path.
///
/// Words are split on `-`, `_`, whitespace and case transitions. Acronyms
/// stay upper case, every other word is lower-cased, and the first letter of
/// the result is capitalized.
pub fn default_label(path: &str) -> String {
    let segment = path.rsplit('.').next().unwrap_or(path);
    let words: Vec<String> = split_words(segment)
        .into_iter()
        .map(|word| {
            if is_acronym(&word) {
                word
            } else {
                word.to_lowercase()
            }
        })
        .collect();

    capitalize(&words.join(" "))
}

fn split_words(segment: &str) -> Vec<String> {
    let chars: Vec<char> = segment.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // "maxPool" splits before P; "HTTPPort" splits before the last P
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn is_acronym(word: &str) -> bool {
    word.chars().filter(|c| c.is_alphabetic()).count() > 1
        && word.chars().all(|c| !c.is_lowercase())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
