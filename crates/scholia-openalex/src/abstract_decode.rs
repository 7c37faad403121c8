//! Decode abstract inverted index to plaintext
//!
//! OpenAlex stores abstracts as inverted indexes for legal reasons:
//! ```json
//! {"Despite": [0], "growing": [1], "interest": [2, 50], ...}
//! ```
//!
//! This module reconstructs the original text by position.

use serde_json::{Map, Value};

/// Placeholder text some sources return instead of a real abstract
const NOT_AVAILABLE: &str = "An abstract is not available for this content";

/// Decode inverted index to plaintext abstract
///
/// Input: JSON object mapping words to position arrays.
/// Output: space-separated words in original order; empty when the index
/// is empty or reconstructs to the upstream "not available" placeholder.
///
/// # Example
/// ```
/// use serde_json::json;
/// use scholia_openalex::abstract_decode::decode_inverted_index;
///
/// let index = json!({"Hello": [0], "world": [1]});
/// let text = decode_inverted_index(index.as_object().unwrap());
/// assert_eq!(text, "Hello world");
/// ```
pub fn decode_inverted_index(index: &Map<String, Value>) -> String {
    if index.is_empty() {
        return String::new();
    }

    // Collect (position, word) pairs
    let mut pairs: Vec<(usize, &str)> = Vec::new();

    for (word, positions) in index {
        if let Some(arr) = positions.as_array() {
            for pos in arr {
                if let Some(p) = pos.as_u64() {
                    pairs.push((p as usize, word.as_str()));
                }
            }
        }
    }

    // Sort by position
    pairs.sort_by_key(|(pos, _)| *pos);

    let words: Vec<&str> = pairs.into_iter().map(|(_, w)| w).collect();
    let text = words.join(" ");

    if text.contains(NOT_AVAILABLE) {
        return String::new();
    }
    text
}
