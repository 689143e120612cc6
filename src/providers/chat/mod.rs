mod api;
mod client;

pub use api::ChatApi;
pub use client::ChatClient;
