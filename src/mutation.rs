//! Mutation Engine
//!
//! Every operation maps (snapshot, arguments) to either a new snapshot or a
//! typed [`MutationError`]. All checks run against the source snapshot before
//! the new one is built, and the source is never written to, so a failure
//! leaves nothing half-applied.
//!
//! Subtree membership uses separator-aware prefix matching throughout
//! (see [`crate::tree::path::is_ancestor_of`]).

use crate::error::MutationError;
use crate::store::NodeStore;
use crate::tree::node::{FileNode, NodeKind};
use crate::tree::path;
use crate::types::{short_id, NodeID, Timestamp};
use crate::upload::{UploadPayload, UploadedFile};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Create an empty file or folder named `name` inside `directory`.
pub fn create(
    store: &NodeStore,
    directory: &str,
    name: &str,
    kind: NodeKind,
    now: Timestamp,
) -> Result<(NodeStore, NodeID), MutationError> {
    let content = if kind.accepts_content() {
        Some(String::new())
    } else {
        None
    };
    insert_new(store, directory, name, kind, 0, now, content)
}

/// Insert a node handed over by the upload collaborator.
///
/// Same name, directory and collision rules as [`create`]; size, kind and
/// timestamp come from the collaborator.
pub fn insert_uploaded(
    store: &NodeStore,
    directory: &str,
    file: &UploadedFile,
) -> Result<(NodeStore, NodeID), MutationError> {
    let size = if file.kind.is_folder() { 0 } else { file.size };
    insert_new(store, directory, &file.name, file.kind, size, file.modified_at, None)
}

fn insert_new(
    store: &NodeStore,
    directory: &str,
    name: &str,
    kind: NodeKind,
    size: u64,
    now: Timestamp,
    content: Option<String>,
) -> Result<(NodeStore, NodeID), MutationError> {
    let name = path::validate_name(name).map_err(MutationError::Validation)?;
    let directory = path::normalize_directory(directory);
    let parent_id = store.resolve_directory(&directory)?;
    let new_path = path::join(&directory, &name);
    if store.find_by_path(&new_path).is_some() {
        return Err(MutationError::Collision(new_path));
    }

    let mut next = store.clone();
    let id = next.allocate_id(&new_path, &now);
    next.insert(FileNode {
        id,
        name,
        kind,
        path: new_path,
        parent_id,
        modified_at: now,
        size,
        content,
        url: None,
    });
    Ok((next, id))
}

/// Rename a node in place; folder renames cascade to every descendant.
pub fn rename(
    store: &NodeStore,
    id: &NodeID,
    new_name: &str,
    now: Timestamp,
) -> Result<NodeStore, MutationError> {
    let new_name = path::validate_name(new_name).map_err(MutationError::Validation)?;
    let node = store
        .get(id)
        .ok_or_else(|| MutationError::NotFound(format!("node {}", short_id(id))))?;

    let old_path = node.path.clone();
    let new_path = path::join(&path::parent_path(&old_path), &new_name);
    if let Some(occupant) = store.find_by_path(&new_path) {
        if occupant.id != *id {
            return Err(MutationError::Collision(new_path));
        }
    }

    let mut next = store.clone();
    if new_path != old_path {
        relocate_subtree(&mut next, id, &old_path, &new_path);
    }
    if let Some(node) = next.get_mut(id) {
        node.name = new_name;
        node.modified_at = now;
    }
    Ok(next)
}

/// Move a node under `destination` (`/` or an existing folder path).
pub fn move_node(
    store: &NodeStore,
    id: &NodeID,
    destination: &str,
    now: Timestamp,
) -> Result<NodeStore, MutationError> {
    let node = store
        .get(id)
        .ok_or_else(|| MutationError::NotFound(format!("node {}", short_id(id))))?;
    let destination = path::normalize_directory(destination);
    let parent_id = store.resolve_directory(&destination)?;

    if node.is_folder()
        && (destination == node.path || path::is_ancestor_of(&node.path, &destination))
    {
        return Err(MutationError::CyclicMove {
            source_path: node.path.clone(),
            destination,
        });
    }

    let old_path = node.path.clone();
    let new_path = path::join(&destination, &node.name);
    // Occupied by any node, the moved one included.
    if store.find_by_path(&new_path).is_some() {
        return Err(MutationError::Collision(new_path));
    }

    let mut next = store.clone();
    relocate_subtree(&mut next, id, &old_path, &new_path);
    if let Some(node) = next.get_mut(id) {
        node.parent_id = parent_id;
        node.modified_at = now;
    }
    Ok(next)
}

/// Remove the listed nodes together with every descendant of listed folders.
///
/// Ids that are already gone are skipped. Returns the new snapshot and the
/// ids actually removed; an empty removal set returns the same snapshot.
pub fn delete(store: &NodeStore, ids: &[NodeID]) -> (NodeStore, BTreeSet<NodeID>) {
    let mut removal: BTreeSet<NodeID> = BTreeSet::new();
    for id in ids {
        let Some(node) = store.get(id) else {
            debug!(node = %short_id(id), "Skipping delete of absent node");
            continue;
        };
        removal.insert(node.id);
        if node.is_folder() {
            removal.extend(store.descendants_of(&node.path).into_iter().map(|d| d.id));
        }
    }

    if removal.is_empty() {
        return (store.clone(), removal);
    }

    let mut next = store.clone();
    for id in &removal {
        next.remove(id);
    }
    (next, removal)
}

/// Attach a decoded upload payload to a node.
///
/// A missing node or a payload that does not fit the node's kind is dropped:
/// the returned flag is false and the snapshot is returned unchanged.
pub fn apply_payload(
    store: &NodeStore,
    id: &NodeID,
    payload: UploadPayload,
    now: Timestamp,
) -> (NodeStore, bool) {
    let Some(node) = store.get(id) else {
        debug!(node = %short_id(id), "Dropping payload for deleted node");
        return (store.clone(), false);
    };
    if !payload.fits(node.kind) {
        warn!(
            node = %short_id(id),
            kind = %node.kind,
            "Dropping payload that does not match node kind"
        );
        return (store.clone(), false);
    }

    let mut next = store.clone();
    if let Some(node) = next.get_mut(id) {
        match payload {
            UploadPayload::Content(content) => node.content = Some(content),
            UploadPayload::Url(url) => node.url = Some(url),
        }
        node.modified_at = now;
    }
    (next, true)
}

/// Rewrite `id` from `old_path` to `new_path` and cascade the prefix swap to
/// every descendant at every depth.
fn relocate_subtree(next: &mut NodeStore, id: &NodeID, old_path: &str, new_path: &str) {
    let mut moves = vec![(*id, new_path.to_string())];
    for descendant in next.descendants_of(old_path) {
        if let Some(rebased) = path::rebase(&descendant.path, old_path, new_path) {
            moves.push((descendant.id, rebased));
        }
    }
    debug!(
        from = old_path,
        to = new_path,
        descendants = moves.len() - 1,
        "Cascading path rewrite"
    );
    next.relocate_all(moves);
}
