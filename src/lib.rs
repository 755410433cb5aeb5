//! vdrive: In-Memory Virtual Drive
//!
//! A hierarchical file/folder model held entirely in memory. Every mutation
//! produces a new immutable snapshot of the node store; listings are
//! projections of a snapshot filtered, searched and sorted on demand.

pub mod advisor;
pub mod config;
pub mod error;
pub mod logging;
pub mod mutation;
pub mod selection;
pub mod session;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod upload;
pub mod views;
