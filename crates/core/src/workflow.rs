//! The end-to-end run: fetch, extract, convert, write.
//!
//! Each stage feeds the next and any failure ends the run before the output
//! file is written.
//!
//! # Example
//!
//! ```no_run
//! use clipdown_core::{RunConfig, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run("https://example.com/article", &RunConfig::default()).await?;
//!     println!("wrote {}", report.path.display());
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use crate::fetch::{FetchConfig, fetch_url};
use crate::formatters::markdown::{MarkdownConfig, MarkdownFormatter};
use crate::output::write_markdown;
use crate::readability::{Readability, ReadabilityConfig};
use crate::Result;

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub fetch: FetchConfig,
    pub readability: ReadabilityConfig,
    pub markdown: MarkdownConfig,
    /// Directory the `.md` file is written to; must exist.
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            readability: ReadabilityConfig::default(),
            markdown: MarkdownConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub path: PathBuf,
    pub title: String,
    pub site_name: Option<String>,
    pub bytes: usize,
}

/// Fetches `url`, extracts its article and writes it as Markdown.
///
/// # Errors
///
/// Returns the first stage error; nothing is written in that case.
pub async fn run(url: &str, config: &RunConfig) -> Result<RunReport> {
    let html = fetch_url(url, &config.fetch)
        .await
        .inspect_err(|e| tracing::warn!(url, error = %e, "fetch failed"))?;

    tracing::debug!(bytes = html.len(), "extracting article");
    let article = Readability::with_config(config.readability.clone())
        .parse_with_url(&html, url)
        .inspect_err(|e| tracing::warn!(url, error = %e, "extraction failed"))?;

    tracing::debug!(title = %article.title, words = article.word_count, "converting article");
    let document = MarkdownFormatter::new(config.markdown.clone())
        .render(&article, url)
        .inspect_err(|e| tracing::warn!(error = %e, "conversion failed"))?;

    let path = write_markdown(&config.output_dir, &article.title, &document)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "write failed"))?;

    if let Some(site_name) = &article.site_name {
        tracing::info!(site_name = %site_name, "article site");
    }

    Ok(RunReport { path, title: article.title, site_name: article.site_name, bytes: document.len() })
}
