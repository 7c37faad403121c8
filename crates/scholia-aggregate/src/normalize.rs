//! Name normalization — raw display name to canonical grouping key

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a raw name to its canonical grouping key.
///
/// Canonical decomposition (NFD), then drop combining marks (removes
/// diacritics) and every character outside letters/digits/whitespace/
/// hyphen, collapse whitespace and hyphen runs to a single space,
/// lowercase, trim. Total and idempotent; returns "" only when the
/// input is empty or consists solely of stripped characters.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_whitespace() || c == '-' {
            if !out.is_empty() {
                pending_space = true;
            }
            continue;
        }
        if !c.is_alphanumeric() {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        for lc in c.to_lowercase() {
            out.push(lc);
        }
    }

    out
}

/// Title-case a canonical key for display: first letter of each word
/// uppercased, rest kept as-is (keys are already lowercase).
pub fn title_case(canonical: &str) -> String {
    canonical
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
