mod basic;
mod gitlab;
mod merge_request;
mod providers;

pub use basic::BasicConfig;
pub use gitlab::GitlabConfig;
pub use merge_request::MergeRequestConfig;
pub use providers::{
    CerebrasConfig, ChatProviderResolvedConfig, OpenRouterConfig, ProviderDefaults,
    ProvidersConfig,
};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
///
/// Built once in `main` and handed to the components that need it.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// LLM backend settings (see `providers` table in config.toml).
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Source-control host settings (see `gitlab` table in config.toml).
    #[serde(default)]
    pub gitlab: GitlabConfig,

    /// Generation pipeline settings (see `merge_request` table in config.toml).
    #[serde(default)]
    pub merge_request: MergeRequestConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const CONFIG_PATH_ENV: &str = "MRSCRIBE_CONFIG";
const ENV_PREFIX: &str = "MRSCRIBE_";

impl Config {
    /// Builds a Figment that merges defaults, the config TOML file (if present) and
    /// `MRSCRIBE_`-prefixed environment variables, in that order.
    ///
    /// Nested keys use `__`, e.g. `MRSCRIBE_PROVIDERS__OPEN_ROUTER__API_KEY`.
    pub fn figment() -> Figment {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if path.is_file() {
            figment.merge(Toml::file(path))
        } else {
            figment
        };
        figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["CONFIG"])
                .split("__"),
        )
    }

    /// Loads and validates the configuration.
    pub fn load() -> Result<Self, figment::Error> {
        let cfg: Self = Self::figment().extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), figment::Error> {
        if self.merge_request.max_patch_lines < 2 {
            return Err(figment::Error::from(
                "merge_request.max_patch_lines must be at least 2".to_string(),
            ));
        }
        Ok(())
    }

    pub fn open_router(&self) -> ChatProviderResolvedConfig {
        self.providers.open_router.resolve(&self.providers.defaults)
    }

    pub fn cerebras(&self) -> ChatProviderResolvedConfig {
        self.providers.cerebras.resolve(&self.providers.defaults)
    }
}
