use mrscribe_schema::{ChatCompletionRequest, ChatCompletionResponse};
use url::Url;

use crate::error::ScribeError;
use crate::utils::logging::body_preview;

pub struct ChatApi;

impl ChatApi {
    pub fn build_chat_request(
        client: &reqwest::Client,
        completions_url: &Url,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<reqwest::Request, reqwest::Error> {
        client
            .post(completions_url.clone())
            .bearer_auth(api_key)
            .json(body)
            .build()
    }

    /// One round trip to `{base}/chat/completions`.
    ///
    /// Non-2xx answers become [`ScribeError::UpstreamStatus`]; the body is only logged.
    pub async fn post_chat(
        client: &reqwest::Client,
        completions_url: &Url,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ScribeError> {
        let req = Self::build_chat_request(client, completions_url, api_key, body)?;
        let resp = client.execute(req).await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            tracing::debug!(
                %status,
                url = %completions_url,
                body = %body_preview(&bytes),
                "Chat completion upstream returned an error status"
            );
            return Err(ScribeError::UpstreamStatus(status));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(
                error = %e,
                body = %body_preview(&bytes),
                "Chat completion body did not match the expected shape"
            );
            ScribeError::JsonError(e)
        })
    }
}
