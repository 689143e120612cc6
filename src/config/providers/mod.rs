mod cerebras;
mod open_router;

pub use cerebras::CerebrasConfig;
pub use open_router::OpenRouterConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Global provider defaults (used when provider-level config is unset).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderDefaults {
    /// Optional upstream HTTP proxy. If set, used for reqwest clients.
    /// TOML: `providers.defaults.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Allow HTTP/2 multiplexing for reqwest clients; disabled forces HTTP/1.
    /// TOML: `providers.defaults.enable_multiplexing`. Default: `false`.
    #[serde(default = "default_enable_multiplexing")]
    pub enable_multiplexing: bool,

    /// Extra attempts after a transport error or upstream 5xx/429.
    /// TOML: `providers.defaults.retry_max_times`. Default: `0` (single round trip).
    #[serde(default)]
    pub retry_max_times: usize,

    /// TCP connect timeout in seconds.
    /// TOML: `providers.defaults.connect_timeout_secs`. Default: `10`.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds.
    /// TOML: `providers.defaults.request_timeout_secs`. Default: `600`.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ProviderDefaults {
    fn default() -> Self {
        Self {
            proxy: None,
            enable_multiplexing: default_enable_multiplexing(),
            retry_max_times: 0,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// All provider configurations.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    /// Global defaults for providers (overridden per provider if set).
    #[serde(default)]
    pub defaults: ProviderDefaults,

    /// OpenRouter backend (`OPEN_ROUTER` providers).
    #[serde(default)]
    pub open_router: OpenRouterConfig,

    /// Cerebras backend (`CEREBRAS` providers).
    #[serde(default)]
    pub cerebras: CerebrasConfig,
}

/// Effective settings for one OpenAI-compatible chat backend.
#[derive(Debug, Clone)]
pub struct ChatProviderResolvedConfig {
    pub base_url: Url,
    pub api_key: String,
    pub proxy: Option<Url>,
    pub enable_multiplexing: bool,
    pub retry_max_times: usize,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

fn default_enable_multiplexing() -> bool {
    false
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    10 * 60
}
