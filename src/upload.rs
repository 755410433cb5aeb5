//! Upload collaborator boundary
//!
//! Decoding happens outside the model. The collaborator first hands over a
//! fully formed file description, which is inserted like a created node, and
//! later delivers the decoded payload keyed by the node's id.

use crate::tree::node::NodeKind;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// File metadata supplied by the upload collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub kind: NodeKind,
    pub size: u64,
    pub modified_at: Timestamp,
}

/// Decoded payload delivered after insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPayload {
    /// Inline text for text nodes
    Content(String),
    /// Inline binary reference (e.g. a data URL) for image and pdf nodes
    Url(String),
}

impl UploadPayload {
    /// Whether a node of `kind` can carry this payload
    pub fn fits(&self, kind: NodeKind) -> bool {
        match self {
            UploadPayload::Content(_) => kind.accepts_content(),
            UploadPayload::Url(_) => kind.accepts_url(),
        }
    }
}
