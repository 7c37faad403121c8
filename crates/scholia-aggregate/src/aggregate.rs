//! Per-group accumulation and summary rows

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::grouper::IdentityGrouper;
use crate::rows::{GroupRow, PairRow};

/// Publication years outside this range are treated as data errors
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Additive statistics for one author group.
///
/// Ordered sets back the fields that are joined into output columns so
/// the joins come out sorted without a separate pass.
#[derive(Debug, Default)]
struct GroupStats {
    author_ids: BTreeSet<String>,
    work_ids: FxHashSet<String>,
    specific_work_ids: FxHashSet<String>,
    /// Citation count per work, first sighting wins
    cited_by_per_work: FxHashMap<String, i32>,
    years: BTreeSet<i32>,
    source_ids: FxHashSet<String>,
    institutions: BTreeSet<String>,
    countries: BTreeSet<String>,
    affiliations: BTreeSet<String>,
}

/// Groups pair rows by normalized author name and accumulates statistics.
///
/// Accumulation is purely additive over sets, so feeding the same row
/// twice changes nothing — the whole pass is idempotent under input
/// duplication.
#[derive(Debug, Default)]
pub struct Aggregator {
    grouper: IdentityGrouper,
    groups: Vec<GroupStats>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one pair row into its author group.
    pub fn observe(&mut self, row: &PairRow) {
        let work_id = row.id.trim();
        if work_id.is_empty() {
            return;
        }

        let group_id = self.grouper.resolve(row.author_name.trim());
        while self.groups.len() <= group_id {
            self.groups.push(GroupStats::default());
        }
        let stats = &mut self.groups[group_id];

        let author_id = row.author_id.trim();
        if !author_id.is_empty() {
            stats.author_ids.insert(author_id.to_string());
        }

        stats.work_ids.insert(work_id.to_string());
        if row.is_relevant() {
            stats.specific_work_ids.insert(work_id.to_string());
        }
        stats
            .cited_by_per_work
            .entry(work_id.to_string())
            .or_insert(row.cited_by_count);

        let source_id = row.source_id.trim();
        if !source_id.is_empty() {
            stats.source_ids.insert(source_id.to_string());
        }

        if let Some(year) = parse_year(&row.publication_date) {
            stats.years.insert(year);
        }

        insert_split(&mut stats.institutions, &row.institutions);
        insert_split(&mut stats.countries, &row.countries);
        insert_split(&mut stats.affiliations, &row.affiliations_comment);
    }

    /// Number of groups created so far
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Emit one row per group, ordered by works_count descending
    /// (group id ascending on ties, stable within a run).
    pub fn summarize(self) -> Vec<GroupRow> {
        let grouper = self.grouper;
        let mut indexed: Vec<(usize, GroupRow)> = self
            .groups
            .into_iter()
            .enumerate()
            .map(|(id, stats)| {
                let row = GroupRow {
                    author_name: grouper.display_name(id),
                    author_ids: join_set(&stats.author_ids),
                    works_count: stats.work_ids.len(),
                    specific_works_count: stats.specific_work_ids.len(),
                    journals_count: stats.source_ids.len(),
                    cited_by_count: stats.cited_by_per_work.values().map(|&c| i64::from(c)).sum(),
                    min_year: stats.years.first().copied(),
                    max_year: stats.years.last().copied(),
                    institutions: join_set(&stats.institutions),
                    countries: join_set(&stats.countries),
                    affiliations_comment: join_set(&stats.affiliations),
                };
                (id, row)
            })
            .collect();

        indexed.sort_by(|(a_id, a), (b_id, b)| {
            b.works_count.cmp(&a.works_count).then(a_id.cmp(b_id))
        });
        indexed.into_iter().map(|(_, row)| row).collect()
    }
}

fn parse_year(date: &str) -> Option<i32> {
    let year: i32 = date.trim().get(..4)?.parse().ok()?;
    YEAR_RANGE.contains(&year).then_some(year)
}

/// Split a ';'-joined column into set entries, trimming blanks
fn insert_split(set: &mut BTreeSet<String>, joined: &str) {
    for part in joined.split(';') {
        let part = part.trim();
        if !part.is_empty() {
            set.insert(part.to_string());
        }
    }
}

fn join_set(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(work_id: &str, author_name: &str, author_id: &str) -> PairRow {
        PairRow {
            id: work_id.to_string(),
            author_name: author_name.to_string(),
            author_id: author_id.to_string(),
            ..PairRow::default()
        }
    }

    #[test]
    fn duplicate_rows_change_nothing() {
        let build = |copies: usize| {
            let mut agg = Aggregator::new();
            let r1 = row("W1", "J. Smith", "A1");
            let r2 = row("W2", "J. Smith", "A1");
            for _ in 0..copies {
                agg.observe(&r1);
                agg.observe(&r2);
            }
            agg.summarize()
        };

        let once = build(1);
        let thrice = build(3);
        assert_eq!(once.len(), thrice.len());
        assert_eq!(once[0].works_count, 2);
        assert_eq!(thrice[0].works_count, 2);
        assert_eq!(once[0].cited_by_count, thrice[0].cited_by_count);
    }

    #[test]
    fn first_citation_count_wins() {
        let mut agg = Aggregator::new();
        let mut first = row("W1", "Alice", "A1");
        first.cited_by_count = 10;
        let mut second = row("W1", "Alice", "A1");
        second.cited_by_count = 99;

        agg.observe(&first);
        agg.observe(&second);

        let rows = agg.summarize();
        assert_eq!(rows[0].cited_by_count, 10);
    }

    #[test]
    fn citations_summed_once_per_distinct_work() {
        let mut agg = Aggregator::new();
        let mut w1 = row("W1", "Alice", "A1");
        w1.cited_by_count = 3;
        let mut w2 = row("W2", "Alice", "A1");
        w2.cited_by_count = 4;

        agg.observe(&w1);
        agg.observe(&w2);
        agg.observe(&w1);

        let rows = agg.summarize();
        assert_eq!(rows[0].works_count, 2);
        assert_eq!(rows[0].cited_by_count, 7);
    }

    #[test]
    fn name_variants_merge_into_one_group() {
        let mut agg = Aggregator::new();
        agg.observe(&row("W1", "J. Smith", "A1"));
        agg.observe(&row("W2", "j smith", "A2"));

        let rows = agg.summarize();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].works_count, 2);
        // Display comes from whichever raw name was normalized first
        assert_eq!(rows[0].author_name, "J Smith");
        assert_eq!(rows[0].author_ids, "A1;A2");
    }

    #[test]
    fn year_range_and_parse_errors() {
        let mut agg = Aggregator::new();
        for (work, date) in [
            ("W1", "2020-05-01"),
            ("W2", "1850-01-01"),
            ("W3", "abcd-01-01"),
            ("W4", "1999"),
            ("W5", ""),
        ] {
            let mut r = row(work, "Alice", "A1");
            r.publication_date = date.to_string();
            agg.observe(&r);
        }

        let rows = agg.summarize();
        assert_eq!(rows[0].min_year, Some(1999));
        assert_eq!(rows[0].max_year, Some(2020));
    }

    #[test]
    fn relevant_works_counted_separately() {
        let mut agg = Aggregator::new();
        let mut relevant = row("W1", "Alice", "A1");
        relevant.relevant_work = "Yes".to_string();
        agg.observe(&relevant);
        agg.observe(&row("W2", "Alice", "A1"));

        let rows = agg.summarize();
        assert_eq!(rows[0].works_count, 2);
        assert_eq!(rows[0].specific_works_count, 1);
    }

    #[test]
    fn ordered_by_works_desc_then_group_id() {
        let mut agg = Aggregator::new();
        agg.observe(&row("W1", "Alice", "A1"));
        agg.observe(&row("W2", "Bob", "A2"));
        agg.observe(&row("W3", "Bob", "A2"));
        agg.observe(&row("W4", "Carol", "A3"));

        let rows = agg.summarize();
        assert_eq!(rows[0].author_name, "Bob");
        // Alice and Carol tie on 1 work; Alice was created first
        assert_eq!(rows[1].author_name, "Alice");
        assert_eq!(rows[2].author_name, "Carol");
    }

    #[test]
    fn empty_names_route_to_unknown_group() {
        let mut agg = Aggregator::new();
        agg.observe(&row("W1", "", "A1"));
        agg.observe(&row("W2", "   ", "A2"));

        let rows = agg.summarize();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].author_name, "(unknown)");
        assert_eq!(rows[0].works_count, 2);
    }

    #[test]
    fn rows_without_work_id_skipped() {
        let mut agg = Aggregator::new();
        agg.observe(&row("", "Alice", "A1"));
        assert_eq!(agg.group_count(), 0);
        assert!(agg.summarize().is_empty());
    }

    #[test]
    fn set_columns_union_and_sort() {
        let mut agg = Aggregator::new();
        let mut r1 = row("W1", "Alice", "A1");
        r1.institutions = "MIT;Harvard".to_string();
        r1.countries = "US".to_string();
        let mut r2 = row("W2", "Alice", "A1");
        r2.institutions = "ETH;MIT".to_string();
        r2.countries = "CH;US".to_string();

        agg.observe(&r1);
        agg.observe(&r2);

        let rows = agg.summarize();
        assert_eq!(rows[0].institutions, "ETH;Harvard;MIT");
        assert_eq!(rows[0].countries, "CH;US");
    }

    #[test]
    fn year_from_sliced_prefix() {
        assert_eq!(parse_year("2021-07-15"), Some(2021));
        assert_eq!(parse_year("2101-01-01"), None);
        assert_eq!(parse_year("190"), None);
        assert_eq!(parse_year(""), None);
    }
}
