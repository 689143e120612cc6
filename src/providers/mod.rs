pub mod chat;

mod gateway;
mod kind;

pub use gateway::LlmGateway;
pub use kind::ProviderKind;
