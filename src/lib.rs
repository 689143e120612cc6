pub mod config;
pub mod db;
pub mod error;
pub mod gitlab;
pub mod merge_request;
pub mod providers;
pub mod server;

mod utils;

pub use error::ScribeError;
