use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::parse::Element;
use crate::scoring::{link_density, text_length};

/// Attributes that survive cleanup; everything else (class, style, id,
/// event handlers, data-*) is dropped.
const ALLOWED_ATTRIBUTES: &[&str] = &[
    "href", "src", "srcset", "alt", "title", "colspan", "rowspan", "datetime", "cite", "lang", "dir", "start",
];

/// Containers dropped when most of their text is link text
const LINK_HEAVY_TAGS: &[&str] = &["div", "section", "aside", "nav", "ul", "ol", "table", "form", "fieldset"];

/// Block and inline wrappers dropped when they end up with nothing in them
const EMPTY_CANDIDATE_TAGS: &[&str] = &[
    "div", "p", "span", "section", "article", "aside", "header", "footer", "nav", "ul", "ol", "li", "blockquote",
    "h1", "h2", "h3", "h4", "h5", "h6", "em", "strong", "b", "i",
];

/// Elements that count as content even without text
const MEDIA_SELECTOR: &str = "img, picture, video, audio, iframe, object, embed, hr, table, math";

static CONDITIONAL_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--\[if[^\]]*\]>.*?<!\[endif\]-->|<!--<!\[if[^\]]*\]>.*?<!\[endif\]-->")
        .expect("CONDITIONAL_COMMENT_RE should compile")
});

/// Configuration for HTML post-processing cleanup
#[derive(Debug, Clone)]
pub struct PostProcessConfig {
    /// Whether to remove empty nodes
    pub remove_empty_nodes: bool,
    /// Maximum passes for removing empty nodes
    pub max_empty_node_passes: usize,
    /// Whether to remove nodes with high link density
    pub remove_high_link_density: bool,
    /// Maximum link density threshold (0.0 to 1.0)
    pub max_link_density: f64,
    /// Whether to remove conditional comments
    pub remove_conditional_comments: bool,
    /// Whether to strip all images
    pub strip_images: bool,
    /// Whether to keep class attributes (default: false)
    pub keep_classes: bool,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            remove_empty_nodes: true,
            max_empty_node_passes: 10,
            remove_high_link_density: true,
            max_link_density: 0.5,
            remove_conditional_comments: true,
            strip_images: false,
            keep_classes: false,
        }
    }
}

/// Post-process extracted HTML by cleaning up remaining unwanted content
pub fn postprocess_html(html: &str, config: &PostProcessConfig) -> String {
    let mut processed = html.to_string();

    if config.remove_conditional_comments {
        processed = CONDITIONAL_COMMENT_RE.replace_all(&processed, "").into_owned();
    }

    processed = clean_attributes(&processed, config);

    let mut fragment = Html::parse_fragment(&processed);

    if config.remove_high_link_density {
        let max_density = config.max_link_density;
        let removed = remove_nodes(&mut fragment, |el| is_link_heavy(el, max_density));
        tracing::trace!(removed, "dropped link-heavy nodes");
    }

    if config.remove_empty_nodes {
        for _ in 0..config.max_empty_node_passes {
            if remove_nodes(&mut fragment, is_empty_node) == 0 {
                break;
            }
        }
    }

    fragment.root_element().inner_html()
}

/// Drop presentational attributes and, optionally, images.
fn clean_attributes(html: &str, config: &PostProcessConfig) -> String {
    let keep_classes = config.keep_classes;

    let mut handlers = vec![lol_html::element!("*", move |el| {
        let names: Vec<String> = el.attributes().iter().map(|attr| attr.name()).collect();
        for name in names {
            let allowed = ALLOWED_ATTRIBUTES.contains(&name.as_str()) || (keep_classes && name == "class");
            if !allowed {
                el.remove_attribute(&name);
            }
        }
        Ok(())
    })];

    if config.strip_images {
        handlers.push(lol_html::element!("img, picture", |el| {
            el.remove();
            Ok(())
        }));
    }

    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings { element_content_handlers: handlers, ..Default::default() },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if rewriter.write(html.as_bytes()).is_err() {
        return html.to_string();
    }
    if rewriter.end().is_err() {
        return html.to_string();
    }

    String::from_utf8_lossy(&output).into_owned()
}

/// Detach every element matching `doomed`; returns how many were matched.
fn remove_nodes(fragment: &mut Html, doomed: impl Fn(&Element<'_>) -> bool) -> usize {
    let ids: Vec<_> = fragment
        .root_element()
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .map(Element::new)
        .filter(|el| doomed(el))
        .map(|el| el.node().id())
        .collect();

    for id in &ids {
        if let Some(mut node) = fragment.tree.get_mut(*id) {
            node.detach();
        }
    }

    ids.len()
}

fn is_link_heavy(element: &Element<'_>, max_density: f64) -> bool {
    LINK_HEAVY_TAGS.contains(&element.tag_name().as_str()) && link_density(element) > max_density
}

fn is_empty_node(element: &Element<'_>) -> bool {
    EMPTY_CANDIDATE_TAGS.contains(&element.tag_name().as_str())
        && text_length(&element.text()) == 0
        && element.select(MEDIA_SELECTOR).map(|found| found.is_empty()).unwrap_or(true)
}
