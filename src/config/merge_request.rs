use serde::{Deserialize, Serialize};

/// Merge-request generation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MergeRequestConfig {
    /// Patches longer than this are cut to their first and last `max_patch_lines / 2` lines.
    /// TOML: `merge_request.max_patch_lines`. Default: `50`.
    #[serde(default = "default_max_patch_lines")]
    pub max_patch_lines: usize,

    /// Reject LLM output missing a `[title:*]` or `[description:*]` tag pair.
    /// When `false`, the missing field is returned as `null`.
    /// TOML: `merge_request.strict_output`. Default: `true`.
    #[serde(default = "default_strict_output")]
    pub strict_output: bool,
}

impl Default for MergeRequestConfig {
    fn default() -> Self {
        Self {
            max_patch_lines: default_max_patch_lines(),
            strict_output: default_strict_output(),
        }
    }
}

fn default_max_patch_lines() -> usize {
    50
}

fn default_strict_output() -> bool {
    true
}
