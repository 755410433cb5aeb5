//! Format listings, trees, and folder paths as text or JSON.

use crate::store::NodeStore;
use crate::tree::node::FileNode;
use crate::types::NodeID;
use crate::views::{SortConfig, SortDirection};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Human-readable size; folders show `-`.
pub fn format_size(node: &FileNode) -> String {
    if node.is_folder() {
        return "-".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = node.size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", node.size)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Directory listing as a table.
pub fn format_listing_text(
    directory: &str,
    listing: &[FileNode],
    sort: SortConfig,
    search: &str,
) -> String {
    let mut out = format!("{}\n", format_section_heading(directory));
    if !search.is_empty() {
        out.push_str(&format!("  Search: {}\n", search));
    }
    out.push_str(&format!(
        "  Sort: {} ({})\n\n",
        sort.key,
        match sort.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    ));
    if listing.is_empty() {
        out.push_str("  (empty)\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Type", "Size", "Modified"]);
    for node in listing {
        let name = if node.is_folder() {
            format!("{}/", node.name)
        } else {
            node.name.clone()
        };
        table.add_row(vec![
            name,
            node.kind.to_string(),
            format_size(node),
            node.modified_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// Directory listing as JSON.
pub fn format_listing_json(directory: &str, listing: &[FileNode], sort: SortConfig) -> String {
    let value = json!({
        "directory": directory,
        "sort": sort,
        "count": listing.len(),
        "nodes": listing,
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}

/// Indented outline of every node; each folder's children follow it.
pub fn format_tree_text(store: &NodeStore) -> String {
    let mut out = String::from("/\n");
    push_children(store, None, 1, &mut out);
    out
}

fn push_children(store: &NodeStore, parent: Option<&NodeID>, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for node in store.children_of(parent) {
        if node.is_folder() {
            out.push_str(&format!("{}{}/\n", indent, node.name.bold()));
            push_children(store, Some(&node.id), depth + 1, out);
        } else {
            out.push_str(&format!("{}{}\n", indent, node.name));
        }
    }
}

pub fn format_folders_text(folders: &[String]) -> String {
    folders.join("\n")
}
