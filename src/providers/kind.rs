use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of LLM backends. Adding a backend means adding a variant here and an
/// arm in [`super::LlmGateway::backend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderKind {
    OpenRouter,
    Cerebras,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "OPEN_ROUTER",
            ProviderKind::Cerebras => "CEREBRAS",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
