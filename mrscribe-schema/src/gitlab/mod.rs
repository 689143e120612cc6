mod compare;
mod project;

pub use compare::{CompareCommit, CompareDiff, CompareResult};
pub use project::GitlabProject;
