//! Reduces a GitLab compare payload to the shape that is sent to the LLM.

use mrscribe_schema::{CompareDiff, CompareResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactedDiff {
    pub commits: Vec<CommitSummary>,
    pub files_changed: Vec<FileSummary>,
    pub total_commits: usize,
    pub total_files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub message: String,
    pub author: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    New,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: String,
    pub status: FileStatus,
    pub additions: usize,
    pub deletions: usize,
    pub diff: String,
}

impl FileStatus {
    /// A file flagged both deleted and new is reported as deleted.
    fn of(diff: &CompareDiff) -> Self {
        if diff.deleted_file {
            FileStatus::Deleted
        } else if diff.new_file {
            FileStatus::New
        } else {
            FileStatus::Modified
        }
    }
}

pub fn compact(compare: &CompareResult, max_lines: usize) -> CompactedDiff {
    let commits: Vec<CommitSummary> = compare
        .commits
        .iter()
        .map(|c| CommitSummary {
            message: c.message.clone(),
            author: c.author_name.clone(),
            timestamp: c.created_at.clone(),
        })
        .collect();

    let files_changed: Vec<FileSummary> = compare
        .diffs
        .iter()
        .map(|d| {
            let patch = d.diff.as_deref().unwrap_or_default();
            FileSummary {
                path: d.new_path.clone(),
                status: FileStatus::of(d),
                // Approximate: a leading `+`/`-` on the very first line is not counted.
                additions: patch.matches("\n+").count(),
                deletions: patch.matches("\n-").count(),
                diff: truncate_patch(patch, max_lines),
            }
        })
        .collect();

    CompactedDiff {
        total_commits: commits.len(),
        total_files: files_changed.len(),
        commits,
        files_changed,
    }
}

/// Keeps short patches verbatim; longer ones keep `max_lines / 2` lines from each end
/// around a single omission marker.
pub fn truncate_patch(patch: &str, max_lines: usize) -> String {
    if patch.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = patch.split('\n').collect();
    if lines.len() <= max_lines {
        return patch.to_string();
    }

    let half = max_lines / 2;
    let marker = format!("\n... ({} lines omitted) ...\n", lines.len() - max_lines);

    let mut kept: Vec<&str> = Vec::with_capacity(half * 2 + 1);
    kept.extend_from_slice(&lines[..half]);
    kept.push(marker.as_str());
    kept.extend_from_slice(&lines[lines.len() - half..]);
    kept.join("\n")
}
