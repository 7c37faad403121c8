//! Work record model — one publication as returned by the works API

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::abstract_decode::decode_inverted_index;

/// One work (publication) from the works API.
///
/// Every field defaults so a malformed payload degrades per-field to
/// empty/zero instead of failing the record.
#[derive(Debug, Deserialize)]
pub struct WorkRow {
    /// OpenAlex ID (e.g., "https://openalex.org/W2741809807")
    #[serde(default)]
    pub id: String,

    /// Digital Object Identifier
    #[serde(default)]
    pub doi: Option<String>,

    /// Title of the work
    #[serde(default)]
    pub title: Option<String>,

    /// Publication date (ISO 8601)
    #[serde(default)]
    pub publication_date: Option<String>,

    /// Citation count
    #[serde(default)]
    pub cited_by_count: i32,

    /// Keywords attached to the work
    #[serde(default)]
    pub keywords: Vec<Keyword>,

    /// Abstract as inverted index
    #[serde(default)]
    pub abstract_inverted_index: Option<Map<String, Value>>,

    /// Authorships (one per contributor, in byline order)
    #[serde(default)]
    pub authorships: Vec<Authorship>,

    /// Primary location (source/venue info)
    #[serde(default)]
    pub primary_location: Option<Location>,
}

/// One (work, contributor) edge with its per-edge metadata.
#[derive(Debug, Deserialize, Default)]
pub struct Authorship {
    #[serde(default)]
    pub author: Option<AuthorRef>,

    /// Author name exactly as printed on the work
    #[serde(default)]
    pub raw_author_name: Option<String>,

    #[serde(default)]
    pub institutions: Vec<Institution>,

    /// ISO country codes for this authorship's affiliations
    #[serde(default)]
    pub countries: Vec<String>,

    /// Unstructured affiliation text, present when institutions are not resolved
    #[serde(default)]
    pub raw_affiliation_strings: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AuthorRef {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Institution {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Keyword {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub source: Option<Source>,
}

#[derive(Debug, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl WorkRow {
    /// Extract short ID from full URL (e.g., "https://openalex.org/W123" -> "W123")
    pub fn short_id(&self) -> &str {
        self.id
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }

    /// Get source (venue) short ID
    pub fn source_id(&self) -> Option<String> {
        self.primary_location
            .as_ref()
            .and_then(|loc| loc.source.as_ref())
            .and_then(|s| s.id.as_ref())
            .map(|id| extract_short_id(id))
    }

    pub fn source_display_name(&self) -> Option<String> {
        self.primary_location
            .as_ref()
            .and_then(|loc| loc.source.as_ref())
            .and_then(|s| s.display_name.clone())
    }

    /// Keyword display names, empty names skipped
    pub fn keyword_names(&self) -> Vec<&str> {
        self.keywords
            .iter()
            .filter_map(|k| k.display_name.as_deref())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Decode abstract from inverted index
    pub fn abstract_text(&self) -> Option<String> {
        self.abstract_inverted_index
            .as_ref()
            .map(decode_inverted_index)
            .filter(|s| !s.is_empty())
    }
}

impl Authorship {
    /// Short ID of the resolved author, if any
    pub fn author_short_id(&self) -> Option<String> {
        self.author
            .as_ref()
            .and_then(|a| a.id.as_ref())
            .filter(|id| !id.is_empty())
            .map(|id| extract_short_id(id))
    }

    /// Structured institution names, empty names skipped
    pub fn institution_names(&self) -> Vec<&str> {
        self.institutions
            .iter()
            .filter_map(|i| i.display_name.as_deref())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Extract short ID from a full OpenAlex URL
pub fn extract_short_id(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}
