//! GitLab `GET /projects/:id/repository/compare` payload.

use serde::{Deserialize, Serialize};

/// Result of comparing two refs. Commits keep upstream order; diffs are unordered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareResult {
    #[serde(default)]
    pub commits: Vec<CompareCommit>,

    #[serde(default)]
    pub diffs: Vec<CompareDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_timeout: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_same_ref: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareCommit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub author_name: String,

    /// Kept as the upstream string; it is only echoed into the prompt.
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareDiff {
    #[serde(default)]
    pub old_path: String,

    #[serde(default)]
    pub new_path: String,

    #[serde(default)]
    pub new_file: bool,

    #[serde(default)]
    pub renamed_file: bool,

    #[serde(default)]
    pub deleted_file: bool,

    /// Unified patch text. GitLab omits it for binary or collapsed files.
    #[serde(default)]
    pub diff: Option<String>,
}
