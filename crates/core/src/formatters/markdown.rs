use crate::article::Article;
use crate::{ClipdownError, Result};

/// Markup fix applied before conversion: a line break closing an emphasis
/// run is moved after the closing tag, so the break sits between the run
/// and the following text.
const EMPHASIS_BREAK: (&str, &str) = ("<br></em>", "</em><br>");

/// Configuration for Markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Strip images from output
    pub strip_images: bool,
}

/// Rewrite body markup into the shape the converter handles well.
pub fn prepare_markup(html: &str) -> String {
    let (from, to) = EMPHASIS_BREAK;
    html.replace(from, to)
}

/// Convert HTML content to Markdown
///
/// # Errors
///
/// Returns [`ClipdownError::Conversion`] when the converter rejects the input.
pub fn convert_to_markdown(html: &str, config: &MarkdownConfig) -> Result<String> {
    let processed = converter_input(html, config);
    let markdown = htmd::convert(&processed).map_err(|e| ClipdownError::Conversion(e.to_string()))?;
    Ok(markdown.trim().to_string())
}

/// Markup handed to the converter.
fn converter_input(html: &str, config: &MarkdownConfig) -> String {
    let prepared = prepare_markup(html);
    if config.strip_images { strip_images(&prepared) } else { prepared }
}

/// Lay out the final document: title heading, body, source link.
pub fn compose_document(title: &str, body: &str, source_url: &str) -> String {
    format!("# {title}\n\n{body}\n\n[Source]({source_url})")
}

/// Strip all img tags from HTML
fn strip_images(html: &str) -> String {
    let mut output = Vec::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("img", |el| {
                el.remove();
                Ok(())
            })],
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if let Err(e) = rewriter.write(html.as_bytes()) {
        tracing::warn!(error = %e, "image stripping failed, keeping images");
        return html.to_string();
    }
    if let Err(e) = rewriter.end() {
        tracing::warn!(error = %e, "image stripping failed, keeping images");
        return html.to_string();
    }

    String::from_utf8_lossy(&output).into_owned()
}

/// Markdown formatter with configurable options
pub struct MarkdownFormatter {
    config: MarkdownConfig,
}

impl MarkdownFormatter {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }

    /// Converts the article body and wraps it into the final document.
    pub fn render(&self, article: &Article, source_url: &str) -> Result<String> {
        let body = convert_to_markdown(&article.content, &self.config)?;
        tracing::debug!(bytes = body.len(), "converted article body to markdown");
        Ok(compose_document(&article.title, &body, source_url))
    }
}
