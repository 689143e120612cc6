use backon::{ExponentialBuilder, Retryable};
use mrscribe_schema::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use std::time::{Duration, Instant};
use tracing::info;
use url::Url;

use super::api::ChatApi;
use crate::config::ChatProviderResolvedConfig;
use crate::error::{IsRetryable, ScribeError};
use crate::providers::ProviderKind;
use crate::utils::http::{ClientOptions, append_path, build_client};

/// OpenAI-compatible chat-completions client bound to one backend.
pub struct ChatClient {
    kind: ProviderKind,
    client: reqwest::Client,
    completions_url: Url,
    api_key: String,
    retry_policy: ExponentialBuilder,
}

impl ChatClient {
    pub fn new(kind: ProviderKind, cfg: &ChatProviderResolvedConfig) -> Result<Self, ScribeError> {
        let client = build_client(&ClientOptions {
            proxy: cfg.proxy.clone(),
            enable_multiplexing: cfg.enable_multiplexing,
            connect_timeout: cfg.connect_timeout,
            request_timeout: cfg.request_timeout,
        })?;
        let completions_url = append_path(&cfg.base_url, &["chat", "completions"])?;

        // `retry_max_times = 0` keeps this at exactly one round trip.
        let retry_policy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(300))
            .with_max_times(cfg.retry_max_times)
            .with_jitter();

        Ok(Self {
            kind,
            client,
            completions_url,
            api_key: cfg.api_key.clone(),
            retry_policy,
        })
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn completions_url(&self) -> &Url {
        &self.completions_url
    }

    pub async fn create_chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletionResponse, ScribeError> {
        let body = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
        };

        let start = Instant::now();
        let resp = (|| ChatApi::post_chat(&self.client, &self.completions_url, &self.api_key, &body))
            .retry(self.retry_policy)
            .when(|err: &ScribeError| err.is_retryable())
            .notify(|err, dur: Duration| {
                tracing::warn!(
                    provider = %self.kind,
                    "Chat completion retrying after error {} in {:?}",
                    err,
                    dur
                );
            })
            .await?;

        info!(
            provider = %self.kind,
            req.model = %model,
            took_ms = start.elapsed().as_millis() as u64,
            choices = resp.choices.len(),
            "[{}] chat completion -> {}",
            self.kind,
            model
        );

        Ok(resp)
    }
}
