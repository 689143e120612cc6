pub mod chat;
pub mod gitlab;

pub use chat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole,
};
pub use gitlab::{CompareCommit, CompareDiff, CompareResult, GitlabProject};
