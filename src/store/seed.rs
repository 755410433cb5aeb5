//! Fixed seed dataset loaded into every new session.

use super::NodeStore;
use crate::error::ApiError;
use crate::tree::node::{FileNode, NodeKind};
use crate::tree::path;
use crate::types::Timestamp;
use chrono::{DateTime, Utc};
use tracing::debug;

/// One seed record
#[derive(Debug, Clone)]
pub struct SeedEntry {
    pub path: &'static str,
    pub kind: NodeKind,
    pub size: u64,
    /// Seconds since the Unix epoch
    pub modified: i64,
    pub content: Option<&'static str>,
}

const fn entry(path: &'static str, kind: NodeKind, size: u64, modified: i64) -> SeedEntry {
    SeedEntry {
        path,
        kind,
        size,
        modified,
        content: None,
    }
}

const fn text(path: &'static str, modified: i64, content: &'static str) -> SeedEntry {
    SeedEntry {
        path,
        kind: NodeKind::Text,
        size: content.len() as u64,
        modified,
        content: Some(content),
    }
}

/// The dataset a fresh session starts from.
pub fn default_seed() -> Vec<SeedEntry> {
    vec![
        entry("/Documents", NodeKind::Folder, 0, 1_705_312_800),
        entry("/Documents/Work", NodeKind::Folder, 0, 1_705_399_200),
        entry("/Documents/Work/quarterly-report.pdf", NodeKind::Pdf, 482_133, 1_705_485_600),
        text(
            "/Documents/Work/meeting-notes.txt",
            1_705_572_000,
            "Agenda:\n- Q1 roadmap\n- Hiring plan\n- Budget review\n",
        ),
        entry("/Documents/Personal", NodeKind::Folder, 0, 1_705_658_400),
        text(
            "/Documents/Personal/todo.txt",
            1_705_744_800,
            "Buy groceries\nCall the bank\nRenew passport\n",
        ),
        entry("/Images", NodeKind::Folder, 0, 1_705_831_200),
        entry("/Images/vacation.jpg", NodeKind::Image, 2_345_678, 1_705_917_600),
        entry("/Images/profile.png", NodeKind::Image, 156_789, 1_706_004_000),
        entry("/Images/Screenshots", NodeKind::Folder, 0, 1_706_090_400),
        entry("/Images/Screenshots/dashboard.png", NodeKind::Image, 98_304, 1_706_176_800),
        entry("/Projects", NodeKind::Folder, 0, 1_706_263_200),
        entry("/Projects/website", NodeKind::Folder, 0, 1_706_349_600),
        text(
            "/Projects/website/index.html",
            1_706_436_000,
            "<!doctype html>\n<html><body><h1>Hello</h1></body></html>\n",
        ),
        entry("/Projects/website/logo.svg", NodeKind::Other, 4_096, 1_706_522_400),
        entry("/Projects/specification.pdf", NodeKind::Pdf, 1_048_576, 1_706_608_800),
        text(
            "/readme.txt",
            1_706_695_200,
            "Welcome to your virtual drive.\n",
        ),
    ]
}

impl NodeStore {
    /// Build a store from seed entries, parents first.
    ///
    /// Entries go through the same name and parent checks as node creation, so
    /// a malformed seed is reported instead of producing an inconsistent store.
    pub fn from_seed(entries: &[SeedEntry]) -> Result<NodeStore, ApiError> {
        let mut ordered: Vec<&SeedEntry> = entries.iter().collect();
        ordered.sort_by_key(|e| path::segment_count(e.path));

        let mut store = NodeStore::new();
        for seed in ordered {
            let name = path::validate_name(path::file_name(seed.path))
                .map_err(|e| ApiError::SeedError(format!("{}: {}", seed.path, e)))?;
            if store.find_by_path(seed.path).is_some() {
                return Err(ApiError::SeedError(format!("duplicate path {}", seed.path)));
            }
            let parent_path = path::parent_path(seed.path);
            let parent_id = store
                .resolve_directory(&parent_path)
                .map_err(|e| ApiError::SeedError(format!("{}: {}", seed.path, e)))?;
            let modified_at: Timestamp =
                DateTime::<Utc>::from_timestamp(seed.modified, 0).unwrap_or_default();
            let full_path = path::join(&parent_path, &name);
            let id = store.allocate_id(&full_path, &modified_at);
            store.insert(FileNode {
                id,
                name,
                kind: seed.kind,
                path: full_path,
                parent_id,
                modified_at,
                size: if seed.kind.is_folder() { 0 } else { seed.size },
                content: seed.content.map(str::to_string),
                url: None,
            });
        }
        debug!(nodes = store.len(), "Seeded node store");
        Ok(store)
    }

    /// Store populated from [`default_seed`].
    pub fn seeded() -> Result<NodeStore, ApiError> {
        Self::from_seed(&default_seed())
    }
}
