//! Output row schemas
//!
//! Two fixed, order-sensitive schemas: one row per deduplicated
//! (work, author) pair, and one summary row per author group. Field
//! order here is the column order downstream consumers rely on.

use serde::Serialize;

/// One deduplicated (work, author) pair.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PairRow {
    /// Work short id
    pub id: String,
    pub doi: String,
    pub title: String,
    pub publication_date: String,
    pub source_id: String,
    pub journal_name: String,
    /// Author name as printed on the work, quote marks trimmed
    pub author_name: String,
    /// Resolved external author id
    pub author_id: String,
    /// Co-author names on the same work, ';'-joined
    pub additional_author_names: String,
    /// Structured institution names, ';'-joined, sorted
    pub institutions: String,
    /// ISO country codes, ';'-joined, sorted
    pub countries: String,
    /// Raw affiliation fallback, only set when no structured institution
    pub affiliations_comment: String,
    pub cited_by_count: i32,
    /// Keyword display names, ';'-joined
    pub keywords: String,
    /// Abstract reconstructed from the inverted index, empty when absent
    pub abstract_text: String,
    /// "Yes" when the work is in the relevant-work set
    pub relevant_work: String,
}

impl PairRow {
    /// Whether the relevant-work flag is set
    pub fn is_relevant(&self) -> bool {
        matches!(
            self.relevant_work.to_lowercase().as_str(),
            "yes" | "true" | "1"
        )
    }
}

/// One aggregated author group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRow {
    /// Title-cased canonical name ("(unknown)" for degenerate names)
    pub author_name: String,
    /// All observed external author ids, ';'-joined, sorted
    pub author_ids: String,
    pub works_count: usize,
    /// Works also present in the relevant-work set
    pub specific_works_count: usize,
    /// Distinct source (venue) ids
    pub journals_count: usize,
    /// Sum of first-seen citation counts, one per distinct work
    pub cited_by_count: i64,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub institutions: String,
    pub countries: String,
    pub affiliations_comment: String,
}
