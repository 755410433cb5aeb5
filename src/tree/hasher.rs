//! NodeID computation

use crate::types::{NodeID, Timestamp};

/// Compute the NodeID for a newly allocated node.
///
/// Hashes the store's allocation sequence number together with the initial
/// path and creation time. The sequence number alone makes ids unique within
/// one store lineage; path and time keep ids from unrelated stores apart.
pub fn compute_node_id(sequence: u64, path: &str, created_at: &Timestamp) -> NodeID {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"vdrive-node\0");
    hasher.update(&sequence.to_le_bytes());
    hasher.update(path.as_bytes());
    hasher.update(&[0u8]);
    hasher.update(&created_at.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
    *hasher.finalize().as_bytes()
}
