//! Explorer session
//!
//! The object a presentation layer talks to. Owns the current store snapshot
//! together with the view state (current directory, search term, sort) and
//! the selection. Each mutation computes a new snapshot through the
//! [`mutation`](crate::mutation) engine and swaps it in only on success.

use crate::config::ExplorerConfig;
use crate::error::{ApiError, MutationError};
use crate::mutation;
use crate::selection::{self, SelectionSet};
use crate::store::NodeStore;
use crate::tree::node::{FileNode, NodeKind};
use crate::tree::path;
use crate::types::{short_id, NodeID, ROOT_PATH};
use crate::upload::{UploadPayload, UploadedFile};
use crate::views::{self, ListingQuery, SortConfig, SortDirection, SortKey};
use chrono::Utc;
use tracing::{debug, info, warn};

pub struct ExplorerSession {
    store: NodeStore,
    /// Current folder by id, so renames and moves of it or its ancestors keep it valid
    current_dir: Option<NodeID>,
    search: String,
    sort: SortConfig,
    selection: SelectionSet,
    loading: bool,
    seed: bool,
}

impl ExplorerSession {
    /// Session in the loading state with an empty store.
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            store: NodeStore::new(),
            current_dir: None,
            search: String::new(),
            sort: config.sort_config(),
            selection: SelectionSet::new(),
            loading: true,
            seed: config.seed,
        }
    }

    /// New session, initialized.
    pub fn open(config: &ExplorerConfig) -> Result<Self, ApiError> {
        let mut session = Self::new(config);
        session.initialize()?;
        Ok(session)
    }

    /// Ready session over an existing store.
    pub fn with_store(store: NodeStore) -> Self {
        Self {
            store,
            current_dir: None,
            search: String::new(),
            sort: SortConfig::default(),
            selection: SelectionSet::new(),
            loading: false,
            seed: false,
        }
    }

    /// Load the seed dataset. Runs once; later calls are no-ops.
    pub fn initialize(&mut self) -> Result<(), ApiError> {
        if !self.loading {
            return Ok(());
        }
        if self.seed {
            self.store = NodeStore::seeded()?;
        }
        self.loading = false;
        info!(nodes = self.store.len(), seeded = self.seed, "Explorer session initialized");
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current snapshot. Holding it is safe across later mutations.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn current_directory(&self) -> String {
        self.store
            .directory_path(self.current_dir.as_ref())
            .unwrap_or_else(|| ROOT_PATH.to_string())
    }

    pub fn current_directory_id(&self) -> Option<NodeID> {
        self.current_dir
    }

    pub fn breadcrumbs(&self) -> Vec<(String, String)> {
        views::breadcrumbs(&self.current_directory())
    }

    // --- navigation and view state ---

    pub fn change_directory(&mut self, directory: &str) -> Result<(), ApiError> {
        let directory = path::normalize_directory(directory);
        let target = self.store.resolve_directory(&directory).map_err(|e| {
            warn!(path = %directory, error = %e, "Change directory failed");
            ApiError::from(e)
        })?;
        if target != self.current_dir {
            self.current_dir = target;
            self.selection.clear();
            debug!(path = %directory, "Changed directory");
        }
        Ok(())
    }

    /// Go to the parent of the current directory; false when already at root.
    pub fn navigate_up(&mut self) -> Result<bool, ApiError> {
        if self.current_dir.is_none() {
            return Ok(false);
        }
        let parent = path::parent_path(&self.current_directory());
        self.change_directory(&parent)?;
        Ok(true)
    }

    pub fn search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn set_sort_config(&mut self, key: SortKey, direction: SortDirection) {
        self.sort = SortConfig::new(key, direction);
    }

    /// Column-header style toggle.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggled(key);
    }

    pub fn sort_config(&self) -> SortConfig {
        self.sort
    }

    /// Projected listing of the current directory; empty while loading.
    pub fn current_files(&self) -> Vec<FileNode> {
        if self.loading {
            return Vec::new();
        }
        views::project(
            &self.store,
            &ListingQuery {
                directory: self.current_dir,
                search: self.search.clone(),
                sort: self.sort,
            },
        )
    }

    pub fn folder_paths(&self) -> Vec<String> {
        self.store.list_folder_paths()
    }

    // --- mutations ---

    pub fn create_node(&mut self, name: &str, kind: NodeKind) -> Result<NodeID, ApiError> {
        let directory = self.current_directory();
        let (next, id) = mutation::create(&self.store, &directory, name, kind, Utc::now())
            .map_err(|e| failed("create", &e))?;
        self.commit(next);
        info!(node = %short_id(&id), directory = %directory, name, kind = %kind, "Created node");
        Ok(id)
    }

    pub fn rename_node(&mut self, id: &NodeID, new_name: &str) -> Result<(), ApiError> {
        let next = mutation::rename(&self.store, id, new_name, Utc::now())
            .map_err(|e| failed("rename", &e))?;
        self.commit(next);
        info!(node = %short_id(id), name = new_name, "Renamed node");
        Ok(())
    }

    pub fn move_node(&mut self, id: &NodeID, destination: &str) -> Result<(), ApiError> {
        let next = mutation::move_node(&self.store, id, destination, Utc::now())
            .map_err(|e| failed("move", &e))?;
        self.commit(next);
        info!(node = %short_id(id), destination, "Moved node");
        Ok(())
    }

    /// Delete nodes and their subtrees; returns how many nodes were removed.
    ///
    /// Removed ids also leave the selection.
    pub fn delete_nodes(&mut self, ids: &[NodeID]) -> usize {
        let (next, removed) = mutation::delete(&self.store, ids);
        if removed.is_empty() {
            return 0;
        }
        self.commit(next);
        self.selection.retain_existing(&self.store);
        info!(requested = ids.len(), removed = removed.len(), "Deleted nodes");
        removed.len()
    }

    /// Multi-select delete: removes every selected node and clears the selection.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids();
        let removed = self.delete_nodes(&ids);
        self.selection.clear();
        removed
    }

    /// Insert a file handed over by the upload collaborator into the current directory.
    pub fn insert_upload(&mut self, file: &UploadedFile) -> Result<NodeID, ApiError> {
        let directory = self.current_directory();
        let (next, id) = mutation::insert_uploaded(&self.store, &directory, file)
            .map_err(|e| failed("upload", &e))?;
        self.commit(next);
        info!(node = %short_id(&id), directory = %directory, name = %file.name, "Inserted upload");
        Ok(id)
    }

    /// Deliver a decoded payload; dropped silently when the node is gone.
    pub fn complete_upload(&mut self, id: &NodeID, payload: UploadPayload) -> bool {
        let (next, applied) = mutation::apply_payload(&self.store, id, payload, Utc::now());
        if applied {
            self.commit(next);
            debug!(node = %short_id(id), "Applied upload payload");
        }
        applied
    }

    // --- selection ---

    pub fn toggle_selection(&mut self, id: NodeID) -> bool {
        self.selection.toggle(id)
    }

    pub fn select_range(&mut self, ids: &[NodeID]) {
        self.selection.select_range(ids.iter().copied());
    }

    /// Shift-click: select everything between `anchor` and `target` in the
    /// current listing.
    pub fn select_range_to(&mut self, anchor: &NodeID, target: &NodeID) {
        let listing = self.current_files();
        let range = selection::range_between(&listing, anchor, target);
        self.selection.select_range(range);
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Swap in a new snapshot and fall back to the root if the current
    /// directory no longer exists.
    fn commit(&mut self, next: NodeStore) {
        self.store = next;
        if let Some(dir) = self.current_dir {
            if self.store.directory_path(Some(&dir)).is_none() {
                debug!(node = %short_id(&dir), "Current directory removed; returning to root");
                self.current_dir = None;
                self.selection.clear();
            }
        }
    }
}

fn failed(operation: &str, err: &MutationError) -> ApiError {
    warn!(operation, error = %err, "Mutation rejected");
    ApiError::Mutation(err.clone())
}
