//! Flat (work, author) pair rows with pair-level deduplication

use rustc_hash::{FxHashMap, FxHashSet};

use scholia_openalex::{Authorship, WorkRow};

use crate::rows::PairRow;

/// Placeholder affiliation text emitted by some publishers
const AFFILIATION_PLACEHOLDER: &str = "View further author information";

/// Quote marks trimmed from raw author names
fn trim_quote_marks(name: &str) -> &str {
    name.trim_matches(|c| matches!(c, '\'' | '"' | 'ʻ' | 'ʼ' | '’' | 'ʽ' | '`' | '´'))
}

/// Build one row per distinct (work, author) pair.
///
/// Iterates `author_ids` in the caller's order so output is reproducible
/// regardless of fetch completion order. Only authorships whose resolved
/// author id is in the requested set produce rows; a pair already seen is
/// silently dropped on re-sighting.
pub fn build_pair_rows(
    author_ids: &[String],
    author_works: &FxHashMap<String, Vec<WorkRow>>,
    relevant_works: &FxHashSet<String>,
) -> Vec<PairRow> {
    let requested: FxHashSet<&str> = author_ids.iter().map(String::as_str).collect();
    let mut seen_pairs: FxHashSet<(String, String)> = FxHashSet::default();
    let mut rows = Vec::new();

    for author_id in author_ids {
        let Some(works) = author_works.get(author_id) else {
            continue;
        };
        for work in works {
            let work_id = work.short_id();
            if work_id.is_empty() {
                continue;
            }
            for authorship in &work.authorships {
                let Some(current_id) = authorship.author_short_id() else {
                    continue;
                };
                if !requested.contains(current_id.as_str()) {
                    continue;
                }
                let pair = (work_id.to_string(), current_id.clone());
                if !seen_pairs.insert(pair) {
                    continue;
                }
                rows.push(shape_pair_row(work, authorship, &current_id, relevant_works));
            }
        }
    }

    rows
}

fn shape_pair_row(
    work: &WorkRow,
    authorship: &Authorship,
    current_id: &str,
    relevant_works: &FxHashSet<String>,
) -> PairRow {
    let work_id = work.short_id().to_string();

    let author_name = authorship
        .raw_author_name
        .as_deref()
        .map(|n| trim_quote_marks(n).to_string())
        .unwrap_or_default();

    // Co-author names from the same work, skipping the current author
    let mut additional: Vec<&str> = Vec::new();
    for other in &work.authorships {
        if other.author.is_none() {
            continue;
        }
        if other.author_short_id().as_deref() == Some(current_id) {
            continue;
        }
        if let Some(name) = other.raw_author_name.as_deref() {
            let name = trim_quote_marks(name);
            if !name.is_empty() {
                additional.push(name);
            }
        }
    }

    let mut institutions: Vec<&str> = authorship.institution_names();
    institutions.sort_unstable();

    let mut countries: Vec<&str> = authorship
        .countries
        .iter()
        .map(String::as_str)
        .filter(|c| !c.is_empty())
        .collect();
    countries.sort_unstable();

    // Raw affiliation strings only stand in when nothing structured exists
    let affiliations_comment = if institutions.is_empty() {
        let mut affiliations: Vec<&str> = authorship
            .raw_affiliation_strings
            .iter()
            .map(String::as_str)
            .filter(|a| !a.is_empty() && *a != AFFILIATION_PLACEHOLDER)
            .collect();
        affiliations.sort_unstable();
        affiliations.join(";")
    } else {
        String::new()
    };

    let relevant = if relevant_works.contains(&work_id) {
        "Yes"
    } else {
        "No"
    };

    PairRow {
        id: work_id,
        doi: work.doi.clone().unwrap_or_default(),
        title: work.title.clone().unwrap_or_default(),
        publication_date: work.publication_date.clone().unwrap_or_default(),
        source_id: work.source_id().unwrap_or_default(),
        journal_name: work.source_display_name().unwrap_or_default(),
        author_name,
        author_id: current_id.to_string(),
        additional_author_names: additional.join(";"),
        institutions: institutions.join(";"),
        countries: countries.join(";"),
        affiliations_comment,
        cited_by_count: work.cited_by_count,
        keywords: work.keyword_names().join(";"),
        abstract_text: work.abstract_text().unwrap_or_default(),
        relevant_work: relevant.to_string(),
    }
}
