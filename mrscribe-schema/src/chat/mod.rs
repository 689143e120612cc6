mod request;
mod response;

pub use request::{ChatCompletionRequest, ChatMessage, ChatRole};
pub use response::{ChatChoice, ChatCompletionResponse, ChatResponseMessage};
