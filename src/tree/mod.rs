//! Node records and path handling for the virtual tree

pub mod hasher;
pub mod node;
pub mod path;

pub use node::{FileNode, NodeKind};
