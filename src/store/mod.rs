//! Node Store
//!
//! Authoritative mapping from NodeID to FileNode plus a path index. The store
//! is a snapshot: both maps sit behind `Arc`, cloning a store is cheap, and
//! the mutation engine writes through `Arc::make_mut` on its own clone, so a
//! reader holding an older snapshot never observes a change.
//!
//! The path index is the only secondary index. Child membership by
//! `parent_id` is derived on demand and must agree with path-prefix
//! membership; [`NodeStore::check_invariants`] verifies that.

pub mod seed;

use crate::error::MutationError;
use crate::tree::hasher::compute_node_id;
use crate::tree::node::FileNode;
use crate::tree::path;
use crate::types::{NodeID, Timestamp, ROOT_PATH};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;
use std::sync::Arc;

/// Immutable snapshot of every node
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Arc<HashMap<NodeID, FileNode>>,
    paths: Arc<BTreeMap<String, NodeID>>,
    next_sequence: u64,
}

impl NodeStore {
    /// Empty store: only the virtual root exists.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &NodeID) -> Option<&FileNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeID) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in path order.
    pub fn iter(&self) -> impl Iterator<Item = &FileNode> + '_ {
        self.paths.values().filter_map(move |id| self.nodes.get(id))
    }

    /// Node stored at `path`. The virtual root resolves to `None`.
    pub fn find_by_path(&self, path: &str) -> Option<&FileNode> {
        if path::is_root(path) {
            return None;
        }
        self.paths.get(path).and_then(|id| self.nodes.get(id))
    }

    /// `/` followed by every folder path, lexicographically sorted.
    pub fn list_folder_paths(&self) -> Vec<String> {
        let mut out = vec![ROOT_PATH.to_string()];
        out.extend(
            self.iter()
                .filter(|node| node.is_folder())
                .map(|node| node.path.clone()),
        );
        out
    }

    /// Nodes whose `parent_id` equals `parent` (`None` for the root), in path order.
    pub fn children_of(&self, parent: Option<&NodeID>) -> Vec<&FileNode> {
        self.iter()
            .filter(|node| node.parent_id.as_ref() == parent)
            .collect()
    }

    /// Every node strictly below `ancestor`, found by separator-aware prefix scan.
    pub fn descendants_of(&self, ancestor: &str) -> Vec<&FileNode> {
        if path::is_root(ancestor) {
            return self.iter().collect();
        }
        let prefix = format!("{}/", ancestor);
        self.paths
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .take_while(|(p, _)| p.starts_with(&prefix))
            .filter_map(|(_, id)| self.nodes.get(id))
            .collect()
    }

    /// Resolve a directory path to its folder id; the root is `Ok(None)`.
    pub fn resolve_directory(&self, directory: &str) -> Result<Option<NodeID>, MutationError> {
        if path::is_root(directory) {
            return Ok(None);
        }
        match self.find_by_path(directory) {
            Some(node) if node.is_folder() => Ok(Some(node.id)),
            Some(_) => Err(MutationError::NotFound(format!(
                "{} is not a folder",
                directory
            ))),
            None => Err(MutationError::NotFound(format!(
                "No folder at {}",
                directory
            ))),
        }
    }

    /// Path of a directory given as folder id (root for `None`).
    pub fn directory_path(&self, directory: Option<&NodeID>) -> Option<String> {
        match directory {
            None => Some(ROOT_PATH.to_string()),
            Some(id) => self
                .nodes
                .get(id)
                .filter(|node| node.is_folder())
                .map(|node| node.path.clone()),
        }
    }

    /// Check path, parent and index consistency; returns every violation found.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.paths.len() != self.nodes.len() {
            violations.push(format!(
                "path index has {} entries for {} nodes",
                self.paths.len(),
                self.nodes.len()
            ));
        }

        for node in self.nodes.values() {
            if self.paths.get(&node.path) != Some(&node.id) {
                violations.push(format!("path {} is not indexed to its node", node.path));
            }
            if path::validate_name(&node.name).as_deref() != Ok(node.name.as_str()) {
                violations.push(format!("invalid name {:?} at {}", node.name, node.path));
            }

            let expected = match node.parent_id {
                None => Some(path::join(ROOT_PATH, &node.name)),
                Some(parent_id) => match self.nodes.get(&parent_id) {
                    Some(parent) if parent.is_folder() => Some(path::join(&parent.path, &node.name)),
                    Some(parent) => {
                        violations.push(format!(
                            "{} has non-folder parent {}",
                            node.path, parent.path
                        ));
                        None
                    }
                    None => {
                        violations.push(format!("{} has a dangling parent id", node.path));
                        None
                    }
                },
            };
            if let Some(expected) = expected {
                if expected != node.path {
                    violations.push(format!("{} should be at {}", node.path, expected));
                }
            }

            if node.parent_id.is_none() != (path::segment_count(&node.path) == 1) {
                violations.push(format!(
                    "{} has a parent id inconsistent with its depth",
                    node.path
                ));
            }
        }

        // Ancestor chains by parent_id; a chain longer than the store is a cycle.
        let mut chain_descendants: HashMap<NodeID, BTreeSet<NodeID>> = HashMap::new();
        for node in self.nodes.values() {
            let mut cursor = node.parent_id;
            let mut steps = 0usize;
            while let Some(ancestor) = cursor {
                if ancestor == node.id || steps > self.nodes.len() {
                    violations.push(format!("{} is its own ancestor", node.path));
                    break;
                }
                chain_descendants.entry(ancestor).or_default().insert(node.id);
                cursor = self.nodes.get(&ancestor).and_then(|a| a.parent_id);
                steps += 1;
            }
        }

        for node in self.nodes.values().filter(|n| n.is_folder()) {
            let by_prefix: BTreeSet<NodeID> = self
                .descendants_of(&node.path)
                .into_iter()
                .map(|d| d.id)
                .collect();
            let by_chain = chain_descendants.remove(&node.id).unwrap_or_default();
            if by_prefix != by_chain {
                violations.push(format!(
                    "descendants of {} diverge: {} by path, {} by parent id",
                    node.path,
                    by_prefix.len(),
                    by_chain.len()
                ));
            }
        }

        violations
    }

    pub(crate) fn allocate_id(&mut self, path: &str, now: &Timestamp) -> NodeID {
        self.next_sequence += 1;
        compute_node_id(self.next_sequence, path, now)
    }

    pub(crate) fn insert(&mut self, node: FileNode) {
        Arc::make_mut(&mut self.paths).insert(node.path.clone(), node.id);
        Arc::make_mut(&mut self.nodes).insert(node.id, node);
    }

    pub(crate) fn remove(&mut self, id: &NodeID) -> Option<FileNode> {
        let node = Arc::make_mut(&mut self.nodes).remove(id)?;
        Arc::make_mut(&mut self.paths).remove(&node.path);
        Some(node)
    }

    pub(crate) fn get_mut(&mut self, id: &NodeID) -> Option<&mut FileNode> {
        Arc::make_mut(&mut self.nodes).get_mut(id)
    }

    /// Re-key a node under a new path; the caller keeps `name`/`parent_id` in step.
    pub(crate) fn relocate(&mut self, id: &NodeID, new_path: String) {
        self.relocate_all(vec![(*id, new_path)]);
    }

    /// Re-key several nodes at once. All old index entries are dropped before
    /// any new one is written, so moves within one subtree cannot clobber
    /// each other.
    pub(crate) fn relocate_all(&mut self, moves: Vec<(NodeID, String)>) {
        let nodes = Arc::make_mut(&mut self.nodes);
        let paths = Arc::make_mut(&mut self.paths);
        for (id, _) in &moves {
            if let Some(node) = nodes.get(id) {
                paths.remove(&node.path);
            }
        }
        for (id, new_path) in moves {
            if let Some(node) = nodes.get_mut(&id) {
                paths.insert(new_path.clone(), id);
                node.path = new_path;
            }
        }
    }

    /// True if both snapshots share the same backing maps.
    pub fn shares_storage_with(&self, other: &NodeStore) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes) && Arc::ptr_eq(&self.paths, &other.paths)
    }
}

/// Two stores are equal when they hold the same nodes.
impl PartialEq for NodeStore {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for NodeStore {}
