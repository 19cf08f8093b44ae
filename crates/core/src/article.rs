//! The extracted article.
//!
//! [`Article`] is what the extractor hands to the converter and the writer:
//! a title, the cleaned body HTML and, when the page advertises one, the
//! site name.

use std::sync::LazyLock;

use regex::Regex;

use crate::{ClipdownError, Document, Result};

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[\w'-]+\b").expect("WORD_RE should compile"));

/// The readable part of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Article title, never empty.
    pub title: String,

    /// Cleaned body HTML, never without text.
    pub content: String,

    /// Publishing site, from JSON-LD or `og:site_name`.
    pub site_name: Option<String>,

    /// Plain text of `content`.
    pub text_content: String,

    /// Word count of `text_content`.
    pub word_count: usize,
}

impl Article {
    /// Builds an article, rejecting an empty title or a body without text.
    ///
    /// # Errors
    ///
    /// Returns [`ClipdownError::NoContent`] when either part is missing.
    pub fn new(title: String, content: String, site_name: Option<String>) -> Result<Self> {
        if title.trim().is_empty() {
            tracing::debug!("article has no title");
            return Err(ClipdownError::NoContent);
        }

        let text_content = html_to_text(&content);
        if text_content.trim().is_empty() {
            tracing::debug!("article body has no text");
            return Err(ClipdownError::NoContent);
        }

        let word_count = WORD_RE.find_iter(&text_content).count();

        Ok(Self { title, content, site_name, text_content, word_count })
    }

    /// Pairs extracted body HTML with the title and site name of `doc`.
    pub fn from_document(doc: &Document, content: String) -> Result<Self> {
        let metadata = doc.extract_metadata();
        let title = metadata.title.ok_or(ClipdownError::NoContent)?;
        Self::new(title, content, metadata.site_name)
    }
}

fn html_to_text(html: &str) -> String {
    scraper::Html::parse_fragment(html).root_element().text().collect()
}
