//! HTML parsing and DOM navigation.
//!
//! [`Document`] wraps a `scraper::Html` tree together with the URL the page
//! was fetched from. [`Element`] is a thin handle on one node of that tree.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::preprocess::{self, PreprocessConfig};
use crate::{ClipdownError, Result};

/// A parsed HTML document.
///
/// # Example
///
/// ```rust
/// use clipdown_core::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML without any cleaning.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html, base_url: None })
    }

    /// Parses HTML after running it through [`preprocess::preprocess_html`].
    ///
    /// When `base_url` is given, relative links and image sources are made
    /// absolute against it.
    pub fn parse_with_preprocessing(html: &str, base_url: Option<Url>) -> Result<Self> {
        let config = PreprocessConfig { base_url, ..Default::default() };
        Self::parse_with_config(html, &config)
    }

    /// Parses HTML after preprocessing it with an explicit configuration.
    pub fn parse_with_config(html: &str, config: &PreprocessConfig) -> Result<Self> {
        let cleaned = preprocess::preprocess_html(html, config);
        let html = Html::parse_document(&cleaned);

        Ok(Self { html, base_url: config.base_url.clone() })
    }

    /// The URL the document was loaded from, if known.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ClipdownError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }

    /// Text of the `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A handle on one element of a [`Document`].
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub(crate) fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// HTML of this element including its own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Lowercase tag name (e.g. "div", "a").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Nearest ancestor that is an element.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Element::new)
    }

    /// Child elements in document order, text nodes skipped.
    pub fn children(&self) -> Vec<Element<'a>> {
        self.element.children().filter_map(ElementRef::wrap).map(Element::new).collect()
    }

    /// True when this element sits somewhere below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &Element<'_>) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.same_node(ancestor) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// True when both handles point at the same node of the same tree.
    pub fn same_node(&self, other: &Element<'_>) -> bool {
        self.element.id() == other.element.id()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ClipdownError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(Element::new).collect())
    }

    pub(crate) fn node(&self) -> ElementRef<'a> {
        self.element
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ClipdownError::HtmlParseError(format!("Invalid selector: {e}")))
}
