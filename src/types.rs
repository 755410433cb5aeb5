//! Core types for the vdrive virtual file-system model.

use chrono::{DateTime, Utc};

/// NodeID: opaque 256-bit identifier of a file or folder record
pub type NodeID = [u8; 32];

/// Timestamp attached to every node (`modified_at`)
pub type Timestamp = DateTime<Utc>;

/// Path of the virtual root. Never backed by a stored node.
pub const ROOT_PATH: &str = "/";

/// Short hex rendering of a NodeID for logs and tables.
pub fn short_id(id: &NodeID) -> String {
    hex::encode(&id[..4])
}
