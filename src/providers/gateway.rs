use mrscribe_schema::ChatMessage;
use tracing::{info, warn};

use super::ProviderKind;
use super::chat::ChatClient;
use crate::config::Config;
use crate::error::ScribeError;

/// Provider-agnostic entry point for chat completions.
///
/// Every backend is constructed at startup from [`Config`]; a call only picks one and
/// performs a single request (plus opt-in retries).
pub struct LlmGateway {
    open_router: ChatClient,
    cerebras: ChatClient,
}

impl LlmGateway {
    pub fn from_config(cfg: &Config) -> Result<Self, ScribeError> {
        let open_router_cfg = cfg.open_router();
        let cerebras_cfg = cfg.cerebras();

        info!(
            open_router_base_url = %open_router_cfg.base_url,
            open_router_key_set = !open_router_cfg.api_key.is_empty(),
            open_router_retry_max_times = open_router_cfg.retry_max_times,
            cerebras_base_url = %cerebras_cfg.base_url,
            cerebras_key_set = !cerebras_cfg.api_key.is_empty(),
            cerebras_retry_max_times = cerebras_cfg.retry_max_times,
            "LLM gateway config (effective)"
        );

        Ok(Self {
            open_router: ChatClient::new(ProviderKind::OpenRouter, &open_router_cfg)?,
            cerebras: ChatClient::new(ProviderKind::Cerebras, &cerebras_cfg)?,
        })
    }

    pub fn backend(&self, kind: ProviderKind) -> &ChatClient {
        match kind {
            ProviderKind::OpenRouter => &self.open_router,
            ProviderKind::Cerebras => &self.cerebras,
        }
    }

    /// Returns the assistant text of the first choice, or `None` when the backend
    /// failed or answered without content. Backend-specific errors stop here.
    pub async fn complete(
        &self,
        kind: ProviderKind,
        model: &str,
        messages: &[ChatMessage],
    ) -> Option<String> {
        let backend = self.backend(kind);

        let resp = match backend.create_chat_completion(model, messages).await {
            Ok(resp) => resp,
            Err(error) => {
                warn!(
                    provider = %kind,
                    model,
                    url = %backend.completions_url(),
                    error = %error,
                    "LLM call failed"
                );
                return None;
            }
        };

        let content = resp.into_first_content();
        if content.is_none() {
            warn!(provider = %kind, model, "LLM response carried no message content");
        }
        content
    }
}
