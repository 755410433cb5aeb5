//! File and folder node records

use crate::types::{NodeID, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Image,
    Pdf,
    Text,
    Other,
}

impl NodeKind {
    pub fn is_folder(self) -> bool {
        self == NodeKind::Folder
    }

    /// Kinds that may carry inline `content`
    pub fn accepts_content(self) -> bool {
        self == NodeKind::Text
    }

    /// Kinds that may carry an inline `url`
    pub fn accepts_url(self) -> bool {
        matches!(self, NodeKind::Image | NodeKind::Pdf)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::Image => "image",
            NodeKind::Pdf => "pdf",
            NodeKind::Text => "text",
            NodeKind::Other => "other",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "folder" | "dir" => Ok(NodeKind::Folder),
            "image" => Ok(NodeKind::Image),
            "pdf" => Ok(NodeKind::Pdf),
            "text" | "txt" => Ok(NodeKind::Text),
            "other" => Ok(NodeKind::Other),
            other => Err(format!("Unknown node kind: {}", other)),
        }
    }
}

/// One file or folder in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    #[serde(with = "hex_id")]
    pub id: NodeID,
    pub name: String,
    pub kind: NodeKind,
    pub path: String,
    #[serde(with = "hex_id_opt")]
    pub parent_id: Option<NodeID>,
    pub modified_at: Timestamp,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FileNode {
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}

mod hex_id {
    use crate::types::NodeID;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &NodeID, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(id))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NodeID, D::Error> {
        let raw = String::deserialize(d)?;
        let bytes = hex::decode(&raw).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| D::Error::custom("node id must be 32 bytes"))
    }
}

mod hex_id_opt {
    use crate::types::NodeID;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &Option<NodeID>, s: S) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => s.serialize_some(&hex::encode(id)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NodeID>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw {
            None => Ok(None),
            Some(raw) => {
                let bytes = hex::decode(&raw).map_err(D::Error::custom)?;
                let id: NodeID = bytes
                    .try_into()
                    .map_err(|_| D::Error::custom("node id must be 32 bytes"))?;
                Ok(Some(id))
            }
        }
    }
}
