use serde::{Deserialize, Serialize};
use url::Url;

/// Source-control host (GitLab) settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GitlabConfig {
    /// GitLab instance root; `/api/v4` is appended.
    /// TOML: `gitlab.base_url`. Default: `https://gitlab.com`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Optional HTTP proxy for GitLab calls.
    /// TOML: `gitlab.proxy`. Falls back to `providers.defaults.proxy` when unset.
    #[serde(default)]
    pub proxy: Option<Url>,
}

impl Default for GitlabConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy: None,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("https://gitlab.com").expect("invalid fixed GitLab base URL")
}
