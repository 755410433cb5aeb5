//! Location advisor boundary
//!
//! A remote service that, given file metadata, suggests a folder path and a
//! rationale. The exchange never mutates the store: acting on a suggestion is
//! a separate, explicit move or create.

use crate::config::AdvisorConfig;
use crate::error::ApiError;
use crate::tree::node::{FileNode, NodeKind};
use crate::tree::path;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DESCRIPTION_CHARS: usize = 200;

/// Metadata sent to the advisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub file_name: String,
    pub file_type: String,
    pub file_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
}

impl SuggestionRequest {
    /// Request describing `node`; its parent folder is sent as the current location.
    pub fn for_node(node: &FileNode) -> Self {
        let file_description = match node.content.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.chars().take(DESCRIPTION_CHARS).collect(),
            _ => describe_kind(node.kind).to_string(),
        };
        Self {
            file_name: node.name.clone(),
            file_type: node.kind.to_string(),
            file_description,
            current_location: Some(path::parent_path(&node.path)),
        }
    }
}

fn describe_kind(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Folder => "A folder",
        NodeKind::Image => "An image file",
        NodeKind::Pdf => "A PDF document",
        NodeKind::Text => "A plain text file",
        NodeKind::Other => "A file",
    }
}

/// Advisor answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSuggestion {
    pub suggested_location: String,
    pub reasoning: String,
}

/// Suggestion collaborator.
///
/// Async because implementations may make network requests.
#[async_trait]
pub trait LocationAdvisor: Send + Sync {
    async fn suggest_location(
        &self,
        request: &SuggestionRequest,
    ) -> Result<LocationSuggestion, ApiError>;
}

/// Advisor reached over HTTP: POSTs the request as JSON, expects a
/// [`LocationSuggestion`] body back.
pub struct HttpLocationAdvisor {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpLocationAdvisor {
    pub fn new(config: &AdvisorConfig) -> Result<Self, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim().to_string(),
            api_key: config.resolved_api_key(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LocationAdvisor for HttpLocationAdvisor {
    async fn suggest_location(
        &self,
        request: &SuggestionRequest,
    ) -> Result<LocationSuggestion, ApiError> {
        debug!(endpoint = %self.endpoint, file = %request.file_name, "Requesting location suggestion");
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Location advisor request failed");
            return Err(ApiError::AdvisorError(format!(
                "advisor returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }
        let suggestion: LocationSuggestion = response.json().await?;
        validate_suggestion(suggestion)
    }
}

/// Normalize the suggested path; an empty suggestion is an error.
pub fn validate_suggestion(mut suggestion: LocationSuggestion) -> Result<LocationSuggestion, ApiError> {
    if suggestion.suggested_location.trim().is_empty() {
        return Err(ApiError::AdvisorError(
            "advisor returned an empty location".to_string(),
        ));
    }
    suggestion.suggested_location = path::normalize_directory(&suggestion.suggested_location);
    Ok(suggestion)
}
