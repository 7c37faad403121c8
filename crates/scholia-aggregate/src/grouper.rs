//! Identity grouping — canonical name key to stable group id

use rustc_hash::FxHashMap;

use crate::normalize::{normalize, title_case};

/// Stable identifier for one author group, allocated monotonically from 0.
pub type GroupId = usize;

/// Maps raw author names to stable group ids for the lifetime of a run.
///
/// Two maps back the lookup: an exact-string cache so repeated raw
/// strings skip re-normalization, and the canonical-key map that defines
/// semantic identity. The first canonical key associated with a group is
/// retained as its display form. Ids are never recycled and groups are
/// never merged after creation.
#[derive(Debug, Default)]
pub struct IdentityGrouper {
    exact: FxHashMap<String, GroupId>,
    canonical: FxHashMap<String, GroupId>,
    /// Canonical display key per group, indexed by GroupId
    names: Vec<String>,
}

impl IdentityGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a raw name to its group id, allocating a new group on
    /// first sighting of a new canonical key.
    pub fn resolve(&mut self, raw: &str) -> GroupId {
        if let Some(&id) = self.exact.get(raw) {
            return id;
        }

        let key = normalize(raw);
        let id = match self.canonical.get(&key) {
            Some(&id) => id,
            None => {
                let id = self.names.len();
                self.canonical.insert(key.clone(), id);
                self.names.push(key);
                id
            }
        };
        self.exact.insert(raw.to_string(), id);
        id
    }

    /// Canonical key retained for a group (empty for the unknown group)
    pub fn canonical_name(&self, id: GroupId) -> &str {
        &self.names[id]
    }

    /// Title-cased display name; degenerate names surface as "(unknown)"
    pub fn display_name(&self, id: GroupId) -> String {
        let key = self.canonical_name(id);
        if key.is_empty() {
            "(unknown)".to_string()
        } else {
            title_case(key)
        }
    }

    /// Number of groups allocated so far
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
