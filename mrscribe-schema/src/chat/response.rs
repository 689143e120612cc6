use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::ChatRole;

/// Chat-completions response envelope.
///
/// Every field the gateway reads is optional or defaulted, so a response that is
/// missing pieces still decodes and the gap is reported by [`Self::first_content`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default)]
    pub choices: Vec<ChatChoice>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ChatResponseMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ChatRole>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if the upstream produced one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }

    pub fn into_first_content(self) -> Option<String> {
        self.choices.into_iter().next()?.message?.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_content_reads_the_first_choice() {
        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "gen-1",
            "model": "gpt-x",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "hello" }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "ignored" } }
            ],
            "usage": { "prompt_tokens": 3 }
        }))
        .expect("decode response");

        assert_eq!(resp.first_content(), Some("hello"));
        assert!(resp.extra.contains_key("usage"));
        assert_eq!(resp.into_first_content().as_deref(), Some("hello"));
    }

    #[test]
    fn missing_pieces_decode_to_no_content() {
        let no_choices: ChatCompletionResponse =
            serde_json::from_value(json!({ "id": "x" })).expect("decode");
        assert_eq!(no_choices.first_content(), None);

        let empty_choices: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).expect("decode");
        assert_eq!(empty_choices.first_content(), None);

        let no_message: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [{ "index": 0 }] })).expect("decode");
        assert_eq!(no_message.first_content(), None);

        let null_content: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .expect("decode");
        assert_eq!(null_content.first_content(), None);
    }
}
