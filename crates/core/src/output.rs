//! Writing the Markdown document to disk.
//!
//! The file is named after the article title, verbatim, with a `.md`
//! extension. An existing file of the same name is replaced.

use std::path::{Path, PathBuf};

use crate::{ClipdownError, Result};

/// Resolves `<dir>/<title>.md`.
///
/// # Errors
///
/// Returns [`ClipdownError::InvalidFilename`] when the title is empty, is
/// `.` or `..`, or contains a path separator.
pub fn output_path(dir: &Path, title: &str) -> Result<PathBuf> {
    if title.trim().is_empty() || title == "." || title == ".." || title.contains(['/', '\\']) {
        return Err(ClipdownError::InvalidFilename(title.to_string()));
    }

    Ok(dir.join(format!("{title}.md")))
}

/// Writes `content` to `<dir>/<title>.md` and returns the path written.
///
/// `dir` must already exist.
pub async fn write_markdown(dir: &Path, title: &str, content: &str) -> Result<PathBuf> {
    let path = output_path(dir, title)?;

    tokio::fs::write(&path, content).await?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote markdown file");

    Ok(path)
}
