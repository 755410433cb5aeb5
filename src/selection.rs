//! Multi-item selection
//!
//! A set of selected node ids, independent of the store. Nothing here checks
//! that selected ids still exist; the session clears the set on directory
//! change and after a multi-select delete.

use crate::store::NodeStore;
use crate::tree::node::FileNode;
use crate::types::NodeID;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: BTreeSet<NodeID>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: NodeID) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Add every id of a contiguous range computed by the caller.
    pub fn select_range<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeID>,
    {
        self.selected.extend(ids);
    }

    /// Empty the set. Returns false (no change) if it was already empty.
    pub fn clear(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    pub fn contains(&self, id: &NodeID) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> Vec<NodeID> {
        self.selected.iter().copied().collect()
    }

    /// Drop ids that no longer exist in `store`. Returns how many were dropped.
    pub fn retain_existing(&mut self, store: &NodeStore) -> usize {
        let before = self.selected.len();
        self.selected.retain(|id| store.contains(id));
        before - self.selected.len()
    }
}

/// Ids between `anchor` and `target` (inclusive) in listing order.
///
/// Either end may come first. An anchor missing from the listing yields just
/// the target; a missing target yields nothing.
pub fn range_between(listing: &[FileNode], anchor: &NodeID, target: &NodeID) -> Vec<NodeID> {
    let Some(end) = listing.iter().position(|n| n.id == *target) else {
        return Vec::new();
    };
    let start = listing.iter().position(|n| n.id == *anchor).unwrap_or(end);
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    listing[lo..=hi].iter().map(|n| n.id).collect()
}
