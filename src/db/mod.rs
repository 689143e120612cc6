//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `create.rs`: insert payloads
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the single owner of the connection pool

pub mod actor;
pub mod create;
pub mod models;
pub mod schema;

pub use actor::{DbActorHandle, spawn};
pub use create::{ModelCreate, ProviderCreate, TemplateCreate};
pub use models::{DbModel, DbProvider, DbTemplate};
pub use schema::SQLITE_INIT;
