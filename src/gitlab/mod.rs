//! GitLab REST v4 client: just enough to compare two branches of a project.

mod client;

pub use client::{GitlabClient, GitlabSession};
