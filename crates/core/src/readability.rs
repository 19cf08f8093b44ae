//! Main content extraction API.
//!
//! [`Readability`] turns raw page HTML into an [`Article`]: metadata is read
//! from the untouched page, then the page is preprocessed, scored and the
//! winning content cleaned up.
//!
//! # Example
//!
//! ```rust
//! use clipdown_core::Readability;
//!
//! let paragraph = "<p>A paragraph of real prose, with commas, clauses, and enough words to count for something.</p>";
//! let html = format!(
//!     "<html><head><title>Example Article</title></head><body><article>{}</article></body></html>",
//!     paragraph.repeat(6)
//! );
//!
//! let article = Readability::new().parse_with_url(&html, "https://example.com/post").unwrap();
//! assert_eq!(article.title, "Example Article");
//! ```

use url::Url;

use crate::article::Article;
use crate::extract::{ExtractConfig, extract_content};
use crate::parse::Document;
use crate::postprocess::PostProcessConfig;
use crate::preprocess::PreprocessConfig;
use crate::{ClipdownError, Result};

/// Configuration for the Readability extractor.
///
/// # Example
///
/// ```rust
/// use clipdown_core::ReadabilityConfig;
///
/// let config = ReadabilityConfig::builder()
///     .min_score(25.0)
///     .char_threshold(500)
///     .preserve_images(false)
///     .build();
/// assert!(!config.preserve_images);
/// ```
#[derive(Debug, Clone)]
pub struct ReadabilityConfig {
    /// Minimum score threshold for extraction (default: 20.0).
    pub min_score: f64,

    /// Minimum character count for valid content (default: 500).
    pub char_threshold: usize,

    /// Number of top candidates to track (default: 5).
    pub nb_top_candidates: usize,

    /// Maximum candidate elements to score (0 = no limit, default: 0).
    pub max_elems_to_parse: usize,

    /// Whether to remove unlikely candidates (default: true).
    pub remove_unlikely: bool,

    /// Whether to preserve class attributes in output HTML (default: false).
    pub keep_classes: bool,

    /// Whether to preserve images in output HTML (default: true).
    pub preserve_images: bool,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            min_score: 20.0,
            char_threshold: 500,
            nb_top_candidates: 5,
            max_elems_to_parse: 0,
            remove_unlikely: true,
            keep_classes: false,
            preserve_images: true,
        }
    }
}

impl ReadabilityConfig {
    /// Creates a new builder for ReadabilityConfig.
    pub fn builder() -> ReadabilityConfigBuilder {
        ReadabilityConfigBuilder::new()
    }

    fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            min_score_threshold: self.min_score,
            max_top_candidates: self.nb_top_candidates,
            char_threshold: self.char_threshold,
            max_elements: self.max_elems_to_parse,
            postprocess: PostProcessConfig {
                strip_images: !self.preserve_images,
                keep_classes: self.keep_classes,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Builder for ReadabilityConfig.
pub struct ReadabilityConfigBuilder {
    config: ReadabilityConfig,
}

impl ReadabilityConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ReadabilityConfig::default() }
    }

    /// Sets the minimum score threshold.
    pub fn min_score(mut self, value: f64) -> Self {
        self.config.min_score = value;
        self
    }

    /// Sets the character threshold.
    pub fn char_threshold(mut self, value: usize) -> Self {
        self.config.char_threshold = value;
        self
    }

    /// Sets the number of top candidates.
    pub fn nb_top_candidates(mut self, value: usize) -> Self {
        self.config.nb_top_candidates = value;
        self
    }

    /// Sets the maximum elements to parse.
    pub fn max_elems_to_parse(mut self, value: usize) -> Self {
        self.config.max_elems_to_parse = value;
        self
    }

    /// Sets whether to remove unlikely candidates.
    pub fn remove_unlikely(mut self, value: bool) -> Self {
        self.config.remove_unlikely = value;
        self
    }

    /// Sets whether to preserve class attributes in output HTML.
    pub fn keep_classes(mut self, value: bool) -> Self {
        self.config.keep_classes = value;
        self
    }

    /// Sets whether to preserve images in output HTML.
    pub fn preserve_images(mut self, value: bool) -> Self {
        self.config.preserve_images = value;
        self
    }

    pub fn build(self) -> ReadabilityConfig {
        self.config
    }
}

impl Default for ReadabilityConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point for content extraction.
#[derive(Debug, Clone, Default)]
pub struct Readability {
    config: ReadabilityConfig,
}

impl Readability {
    /// Creates a new Readability instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new Readability instance with a custom configuration.
    pub fn with_config(config: ReadabilityConfig) -> Self {
        Self { config }
    }

    /// Parses HTML with no known origin; relative links stay relative.
    ///
    /// # Errors
    ///
    /// Returns [`ClipdownError::NoContent`] or [`ClipdownError::NotReadable`]
    /// when no article can be isolated.
    pub fn parse(&self, html: &str) -> Result<Article> {
        self.extract(html, None)
    }

    /// Parses HTML fetched from `url`, resolving relative links against it.
    ///
    /// # Errors
    ///
    /// Returns [`ClipdownError::InvalidUrl`] if the URL is invalid, and the
    /// same extraction errors as [`Readability::parse`].
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Article> {
        let base_url = Url::parse(url).map_err(|e| ClipdownError::InvalidUrl(format!("{url}: {e}")))?;
        self.extract(html, Some(base_url))
    }

    fn extract(&self, html: &str, base_url: Option<Url>) -> Result<Article> {
        // Preprocessing drops <script>, JSON-LD included, so metadata comes from the raw page.
        let raw = Document::parse(html)?;

        let preprocess = PreprocessConfig { remove_unlikely: self.config.remove_unlikely, base_url, ..Default::default() };
        let doc = Document::parse_with_config(html, &preprocess)?;

        let extracted = extract_content(&doc, &self.config.extract_config())?;
        tracing::debug!(
            score = extracted.top_score,
            elements = extracted.element_count,
            bytes = extracted.content.len(),
            "extracted article body"
        );

        Article::from_document(&raw, extracted.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_html() -> String {
        let paragraph = "<p>This is a long paragraph with plenty of content, text, commas, and meaningful sentences for scoring.</p>";
        format!(
            r#"<!DOCTYPE html>
            <html lang="en">
            <head>
                <title>A Test Article Headline | Example News</title>
                <meta property="og:site_name" content="Example News">
            </head>
            <body>
                <nav><a href="/">Home</a> <a href="/world">World</a></nav>
                <article class="main-content">
                    <h1>Article Title</h1>
                    {}
                    <p>See the <a href="/related">related piece</a> and this <img src="/images/photo.jpg" alt="Photo"> too, because it matters.</p>
                </article>
            </body>
            </html>"#,
            paragraph.repeat(5)
        )
    }

    #[test]
    fn test_readability_config_default() {
        let config = ReadabilityConfig::default();
        assert_eq!(config.min_score, 20.0);
        assert_eq!(config.char_threshold, 500);
        assert_eq!(config.nb_top_candidates, 5);
        assert_eq!(config.max_elems_to_parse, 0);
        assert!(config.remove_unlikely);
        assert!(!config.keep_classes);
        assert!(config.preserve_images);
    }

    #[test]
    fn test_readability_config_builder() {
        let config = ReadabilityConfig::builder()
            .min_score(30.0)
            .char_threshold(1000)
            .nb_top_candidates(10)
            .max_elems_to_parse(500)
            .remove_unlikely(false)
            .keep_classes(true)
            .preserve_images(false)
            .build();

        assert_eq!(config.min_score, 30.0);
        assert_eq!(config.char_threshold, 1000);
        assert_eq!(config.nb_top_candidates, 10);
        assert_eq!(config.max_elems_to_parse, 500);
        assert!(!config.remove_unlikely);
        assert!(config.keep_classes);
        assert!(!config.preserve_images);
    }

    #[test]
    fn test_max_elements_zero_means_no_limit() {
        let config = ReadabilityConfig::default().extract_config();
        assert_eq!(config.max_elements, 0);

        let config = ReadabilityConfig::builder().max_elems_to_parse(50).build().extract_config();
        assert_eq!(config.max_elements, 50);
    }

    #[test]
    fn test_article_found_among_many_divs() {
        let paragraph = "<p>A paragraph of real prose, with commas, clauses, and enough words to count for something.</p>";
        let widgets = "<div><span>i</span></div>".repeat(1001);
        let html = format!(
            "<html><head><title>Example Article</title></head><body><article>{}</article><div>{widgets}</div></body></html>",
            paragraph.repeat(6)
        );

        let article = Readability::new().parse(&html).unwrap();
        assert_eq!(article.title, "Example Article");
        assert!(article.content.contains("enough words to count"));
    }

    #[test]
    fn test_parse_with_url() {
        let article = Readability::new()
            .parse_with_url(&article_html(), "https://news.example.com/2024/story")
            .unwrap();

        assert_eq!(article.title, "A Test Article Headline");
        assert_eq!(article.site_name.as_deref(), Some("Example News"));
        assert!(article.content.contains("meaningful sentences"));
        assert!(article.content.contains("https://news.example.com/images/photo.jpg"));
        assert!(!article.content.contains("World"));
    }

    #[test]
    fn test_parse_without_url_keeps_relative_links() {
        let article = Readability::new().parse(&article_html()).unwrap();
        assert!(article.content.contains(r#"src="/images/photo.jpg""#));
    }

    #[test]
    fn test_images_can_be_dropped() {
        let config = ReadabilityConfig::builder().preserve_images(false).build();
        let article = Readability::with_config(config).parse(&article_html()).unwrap();
        assert!(!article.content.contains("<img"));
    }

    #[test]
    fn test_invalid_url() {
        let result = Readability::new().parse_with_url(&article_html(), "not a url");
        assert!(matches!(result, Err(ClipdownError::InvalidUrl(_))));
    }

    #[test]
    fn test_navigation_page_is_rejected() {
        let links: String = (0..40).map(|i| format!(r#"<li><a href="/s/{i}">Section {i}</a></li>"#)).collect();
        let html = format!("<html><head><title>Index</title></head><body><ul>{links}</ul></body></html>");

        let result = Readability::new().parse(&html);
        assert!(matches!(result, Err(ClipdownError::NotReadable { .. } | ClipdownError::NoContent)));
    }

    #[test]
    fn test_untitled_page_is_rejected() {
        let paragraph = "<p>A paragraph of real prose, with commas, clauses, and enough words to count for something.</p>";
        let html = format!("<html><body><article>{}</article></body></html>", paragraph.repeat(6));

        let result = Readability::new().parse(&html);
        assert!(matches!(result, Err(ClipdownError::NoContent)));
    }
}
