//! CSV writers and flat-file input loaders

use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

use crate::rows::{GroupRow, PairRow};

/// Write pair rows with every field quoted, matching the export format
/// downstream consumers already parse.
pub fn write_pair_rows(path: &Path, rows: &[PairRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("Failed to write pair row")?;
    }
    writer.flush().context("Failed to flush pair rows")?;
    log::info!("Wrote {} pair rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write group summary rows.
pub fn write_group_rows(path: &Path, rows: &[GroupRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("Failed to write group row")?;
    }
    writer.flush().context("Failed to flush group rows")?;
    log::info!("Wrote {} group rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read pair rows back from a CSV export.
///
/// Columns are looked up by header name and default to empty/zero when
/// missing or malformed, so files from older exports still load.
pub fn read_pair_rows(path: &Path) -> Result<Vec<PairRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Missing header row in {}", path.display()))?
        .clone();
    let col = |name: &str| headers.iter().position(|h| h == name);

    let c_id = col("id");
    let c_doi = col("doi");
    let c_title = col("title");
    let c_date = col("publication_date");
    let c_source_id = col("source_id");
    let c_journal = col("journal_name");
    let c_name = col("author_name");
    let c_author_id = col("author_id");
    let c_additional = col("additional_author_names");
    let c_institutions = col("institutions");
    let c_countries = col("countries");
    let c_affiliations = col("affiliations_comment");
    let c_cited = col("cited_by_count");
    let c_keywords = col("keywords");
    let c_abstract = col("abstract_text");
    let c_relevant = col("relevant_work");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Bad CSV record in {}", path.display()))?;
        let field =
            |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").to_string();

        rows.push(PairRow {
            id: field(c_id),
            doi: field(c_doi),
            title: field(c_title),
            publication_date: field(c_date),
            source_id: field(c_source_id),
            journal_name: field(c_journal),
            author_name: field(c_name),
            author_id: field(c_author_id),
            additional_author_names: field(c_additional),
            institutions: field(c_institutions),
            countries: field(c_countries),
            affiliations_comment: field(c_affiliations),
            cited_by_count: field(c_cited).trim().parse().unwrap_or(0),
            keywords: field(c_keywords),
            abstract_text: field(c_abstract),
            relevant_work: field(c_relevant),
        });
    }

    log::info!("Read {} pair rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load ids from a newline-delimited file, preserving first-seen order.
///
/// Blank lines and `#` comments are skipped.
pub fn read_id_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;

    let mut seen = FxHashSet::default();
    let mut ids = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if seen.insert(line.to_string()) {
            ids.push(line.to_string());
        }
    }
    Ok(ids)
}

/// Load ids from a newline-delimited file as a membership set.
pub fn read_id_set(path: &Path) -> Result<FxHashSet<String>> {
    Ok(read_id_list(path)?.into_iter().collect())
}
