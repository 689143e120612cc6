use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{ChatProviderResolvedConfig, ProviderDefaults};

/// Cerebras provider configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CerebrasConfig {
    /// OpenAI-compatible API root; `/chat/completions` is appended.
    /// TOML: `providers.cerebras.base_url`. Default: `https://api.cerebras.ai/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Bearer key sent to Cerebras.
    /// TOML: `providers.cerebras.api_key`.
    #[serde(default)]
    pub api_key: String,

    /// Optional upstream HTTP proxy.
    /// TOML: `providers.cerebras.proxy`.
    /// Falls back to `providers.defaults.proxy` when unset.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// TOML: `providers.cerebras.enable_multiplexing`.
    /// Falls back to `providers.defaults.enable_multiplexing`.
    #[serde(default)]
    pub enable_multiplexing: Option<bool>,

    /// TOML: `providers.cerebras.retry_max_times`.
    /// Falls back to `providers.defaults.retry_max_times`.
    #[serde(default)]
    pub retry_max_times: Option<usize>,
}

impl CerebrasConfig {
    pub fn resolve(&self, defaults: &ProviderDefaults) -> ChatProviderResolvedConfig {
        ChatProviderResolvedConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            enable_multiplexing: self
                .enable_multiplexing
                .unwrap_or(defaults.enable_multiplexing),
            retry_max_times: self.retry_max_times.unwrap_or(defaults.retry_max_times),
            connect_timeout: Duration::from_secs(defaults.connect_timeout_secs),
            request_timeout: Duration::from_secs(defaults.request_timeout_secs),
        }
    }
}

impl Default for CerebrasConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            proxy: None,
            enable_multiplexing: None,
            retry_max_times: None,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("https://api.cerebras.ai/v1").expect("invalid fixed Cerebras base URL")
}
