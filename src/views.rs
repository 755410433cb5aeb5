//! Directory Views
//!
//! Derives the visible listing of one directory: membership, case-insensitive
//! search and a stable folders-first sort. Pure functions of the store and a
//! [`ListingQuery`]; nothing here mutates.

use crate::store::NodeStore;
use crate::tree::node::FileNode;
use crate::tree::path;
use crate::types::NodeID;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Modified,
    Size,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "modified" | "date" | "modifiedat" => Ok(SortKey::Modified),
            "size" => Ok(SortKey::Size),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Name => "name",
            SortKey::Modified => "modified",
            SortKey::Size => "size",
        })
    }
}

/// Sort configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column-header click: the active key flips direction, another key
    /// starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.flipped())
        } else {
            Self::new(key, SortDirection::Ascending)
        }
    }
}

/// Inputs of a directory projection
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Folder whose children are listed; `None` is the virtual root
    pub directory: Option<NodeID>,
    pub search: String,
    pub sort: SortConfig,
}

/// Visible listing for `query.directory`.
pub fn project(store: &NodeStore, query: &ListingQuery) -> Vec<FileNode> {
    // The term is matched verbatim; whitespace is significant.
    let needle = query.search.to_lowercase();
    let mut listing: Vec<FileNode> = store
        .children_of(query.directory.as_ref())
        .into_iter()
        .filter(|node| query.search.is_empty() || node.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    sort_listing(&mut listing, query.sort);
    listing
}

/// Stable folders-first sort. Equal keys keep their prior order in both
/// directions.
pub fn sort_listing(listing: &mut [FileNode], sort: SortConfig) {
    listing.sort_by(|a, b| {
        match (a.is_folder(), b.is_folder()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        let ordering = compare_by_key(a, b, sort.key);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_by_key(a: &FileNode, b: &FileNode, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Modified => a.modified_at.cmp(&b.modified_at),
        SortKey::Size => a.size.cmp(&b.size),
    }
}

/// Membership by path instead of parent id: nodes whose parent path equals
/// `directory`. Agrees with [`NodeStore::children_of`] on a consistent store.
pub fn membership_by_path<'a>(store: &'a NodeStore, directory: &str) -> Vec<&'a FileNode> {
    let directory = path::normalize_directory(directory);
    store
        .iter()
        .filter(|node| path::parent_path(&node.path) == directory)
        .collect()
}

/// (label, path) trail from the root to `directory`.
pub fn breadcrumbs(directory: &str) -> Vec<(String, String)> {
    path::breadcrumbs(&path::normalize_directory(directory))
}
