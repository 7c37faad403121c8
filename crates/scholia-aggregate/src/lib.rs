//! Scholia Aggregate - identity resolution and per-author statistics
//!
//! Consumes the fetched works, deduplicates (work, author) pairs into
//! flat rows, groups author sightings by normalized name, and
//! accumulates per-group publication statistics.

pub mod aggregate;
pub mod export;
pub mod grouper;
pub mod normalize;
pub mod pairs;
pub mod rows;

// Re-exports for convenience
pub use aggregate::Aggregator;
pub use export::{read_id_list, read_id_set, read_pair_rows, write_group_rows, write_pair_rows};
pub use grouper::{GroupId, IdentityGrouper};
pub use normalize::{normalize, title_case};
pub use pairs::build_pair_rows;
pub use rows::{GroupRow, PairRow};
