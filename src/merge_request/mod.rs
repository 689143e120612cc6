//! Merge-request title/description generation.
//!
//! Layout:
//! - `compactor.rs`: GitLab compare payload -> compact JSON for the prompt
//! - `prompt.rs`: fixed system instruction and per-request user message
//! - `extract.rs`: tagged-section parsing of the model answer
//! - `service.rs`: the end-to-end pipeline

pub mod compactor;
pub mod extract;
pub mod prompt;
mod service;

pub use compactor::{CompactedDiff, CommitSummary, FileStatus, FileSummary, compact};
pub use extract::{Section, extract_section};
pub use prompt::{DEFAULT_PROJECT_CONTEXT, PromptParts, SYSTEM_PROMPT};
pub use service::MergeRequestService;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/merge-request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequestInput {
    pub project_id: i64,
    /// Source branch of the merge request.
    pub origin_branch: String,
    pub target_branch: String,
    #[serde(default)]
    pub context_ai: String,
    /// GitLab personal access token. Used for this request only.
    pub pat: String,
    pub template_id: i64,
    pub provider_id: i64,
    /// Model name as registered under the provider.
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub title: Option<String>,
    pub description: Option<String>,
}
