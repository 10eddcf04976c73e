use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommentFile {
    Bare(Vec<String>),
    Wrapped { comments: Vec<String> },
}

/// Read the comment batch from a JSON file: either a bare array of strings
/// or an object with a `comments` array.
pub fn load_comments(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read comments file {}", path.display()))?;

    let parsed: CommentFile = serde_json::from_str(&raw)
        .with_context(|| format!("invalid JSON in comments file {}", path.display()))?;

    let comments = match parsed {
        CommentFile::Bare(comments) | CommentFile::Wrapped { comments } => comments,
    };

    let comments = comments
        .into_iter()
        .map(|comment| comment.trim().to_owned())
        .filter(|comment| !comment.is_empty())
        .collect::<Vec<_>>();

    if comments.is_empty() {
        return Err(anyhow!(
            "comments file {} contains no non-empty comments",
            path.display()
        ));
    }

    Ok(comments)
}
