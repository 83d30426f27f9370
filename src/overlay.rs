// ✂️ Curation Overlay - session-local removed / added school names
//
// Layered on top of the source data, never written into it.
// Removed wins over added: a name in both sets is hidden everywhere until
// it is restored, at which point its added-set membership shows again.

use crate::parser::CompetitorRecord;
use crate::registry::CollegeRegistry;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

// ============================================================================
// CURATION OVERLAY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CurationOverlay {
    removed: BTreeSet<String>,
    added: BTreeSet<String>,
}

impl CurationOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide a school. Removing twice is a no-op.
    ///
    /// Returns true when the name was not already removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let changed = self.removed.insert(name.to_string());
        if changed {
            debug!(school = name, "school removed from working set");
        }
        changed
    }

    /// Undo a removal. Restoring a name that was never removed is a no-op.
    pub fn restore(&mut self, name: &str) -> bool {
        let changed = self.removed.remove(name);
        if changed {
            debug!(school = name, "school restored to working set");
        }
        changed
    }

    /// Inject a school into every category's map view.
    ///
    /// Callers only offer registry names (see [`suggest_additions`]); an
    /// unknown name is accepted and simply never resolves to a marker.
    pub fn add(&mut self, name: &str) -> bool {
        let changed = self.added.insert(name.to_string());
        if changed {
            debug!(school = name, "school added to working set");
        }
        changed
    }

    pub fn is_removed(&self, name: &str) -> bool {
        self.removed.contains(name)
    }

    pub fn is_added(&self, name: &str) -> bool {
        self.added.contains(name)
    }

    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.removed.iter().map(String::as_str)
    }

    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.added.iter().map(String::as_str)
    }

    /// Added names that are not currently removed
    pub fn visible_additions(&self) -> impl Iterator<Item = &str> {
        self.added()
            .filter(move |name| !self.removed.contains(*name))
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    /// Keep only the records whose school is not removed
    ///
    /// Yielded records borrow only `records`, so the overlay can be mutated
    /// while they are held.
    pub fn retain_visible<'s, 'r: 's>(
        &'s self,
        records: &'r [CompetitorRecord],
    ) -> impl Iterator<Item = &'r CompetitorRecord> + 's {
        records
            .iter()
            .filter(move |record| !self.is_removed(&record.school_name))
    }
}

// ============================================================================
// SUGGESTIONS
// ============================================================================

/// Registry names offered by the search-and-add control.
///
/// A name qualifies when it appears nowhere in the loaded data, has not been
/// added yet, and contains the query (case-insensitive). Registry order,
/// capped at `limit`. A blank query offers nothing.
pub fn suggest_additions(
    registry: &CollegeRegistry,
    records: &[CompetitorRecord],
    overlay: &CurationOverlay,
    query: &str,
    limit: usize,
) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let existing: HashSet<&str> = records.iter().map(|r| r.school_name.as_str()).collect();

    registry
        .names()
        .filter(|name| !existing.contains(name) && !overlay.is_added(name))
        .filter(|name| name.to_lowercase().contains(&query))
        .take(limit)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
