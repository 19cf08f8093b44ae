use std::sync::LazyLock;

use regex::Regex;

use crate::parse::Element;

/// Configuration for content scoring algorithm
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Maximum content density score from character count
    pub max_char_density_score: f64,
    /// Maximum content density score from comma count
    pub max_comma_density_score: f64,
    /// Characters per point for content density scoring
    pub chars_per_point: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            positive_weight: 25.0,
            negative_weight: -25.0,
            max_char_density_score: 3.0,
            max_comma_density_score: 3.0,
            chars_per_point: 100,
        }
    }
}

/// Result of scoring an element
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Base score from tag type
    pub base_score: f64,
    /// Weight adjustment from class/ID patterns
    pub class_weight: f64,
    /// Content density score
    pub content_density: f64,
    /// Link density (0.0 to 1.0)
    pub link_density: f64,
    /// Final calculated score
    pub final_score: f64,
}

/// Positive patterns that suggest an element contains main content
static POSITIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story|poem|tweet)")
        .expect("POSITIVE_RE should compile")
});

/// Negative patterns that suggest an element does NOT contain main content
static NEGATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(-ad-|hidden|banner|breadcrumbs?|combx|comment|com-|contact|foot|footer|footnote|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|widget)",
    )
    .expect("NEGATIVE_RE should compile")
});

/// Base score by tag:
/// - ARTICLE: +10, SECTION: +8, DIV: +5
/// - TD, BLOCKQUOTE: +3
/// - FORM, ADDRESS, lists: -3
/// - headings, TH, HEADER, FOOTER, NAV: -5
pub fn base_tag_score(element: &Element<'_>) -> f64 {
    match element.tag_name().as_str() {
        "article" => 10.0,
        "section" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" => 3.0,
        "form" | "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    }
}

/// Class/ID weight: the id is checked first, then each class name.
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let names = element
        .attr("id")
        .into_iter()
        .chain(element.attr("class").into_iter().flat_map(str::split_whitespace));

    for name in names {
        if POSITIVE_RE.is_match(name) {
            return config.positive_weight;
        }
        if NEGATIVE_RE.is_match(name) {
            return config.negative_weight;
        }
    }

    0.0
}

/// Character count with runs of whitespace counted once.
pub fn text_length(text: &str) -> usize {
    let mut length = 0;
    let mut in_space = true;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                length += 1;
                in_space = true;
            }
        } else {
            length += 1;
            in_space = false;
        }
    }
    if in_space && length > 0 { length - 1 } else { length }
}

/// Points for text length and comma count, each capped.
pub fn content_density_score(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let text = element.text();
    let char_score = ((text_length(&text) / config.chars_per_point) as f64).min(config.max_char_density_score);
    let comma_score = (text.matches(',').count() as f64).min(config.max_comma_density_score);

    char_score + comma_score
}

/// Ratio of link text to total text, from 0.0 to 1.0.
///
/// In-page anchors (`href="#..."`) count for a third of their length.
pub fn link_density(element: &Element<'_>) -> f64 {
    let total = text_length(&element.text());
    if total == 0 {
        return 0.0;
    }

    let link_length: f64 = element
        .select("a")
        .unwrap_or_default()
        .iter()
        .map(|link| {
            let weight = if link.attr("href").is_some_and(|h| h.starts_with('#')) { 0.3 } else { 1.0 };
            text_length(&link.text()) as f64 * weight
        })
        .sum();

    (link_length / total as f64).min(1.0)
}

/// Final score: (base + class weight + density) scaled by the link penalty.
///
/// Elements with a positive class/id or more than 500 characters of text get
/// half the usual link penalty.
pub fn calculate_score(element: &Element<'_>, config: &ScoreConfig) -> ScoreResult {
    let base_score = base_tag_score(element);
    let class_weight = class_id_weight(element, config);
    let content_density = content_density_score(element, config);
    let ld = link_density(element);

    let content_rich = text_length(&element.text()) > 500;
    let link_penalty = if class_weight > 0.0 || content_rich { 1.0 - (ld * 0.5) } else { 1.0 - ld };

    let final_score = (base_score + class_weight + content_density) * link_penalty;

    ScoreResult { base_score, class_weight, content_density, link_density: ld, final_score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use rstest::rstest;

    fn first<'a>(doc: &'a Document, selector: &str) -> Element<'a> {
        doc.select(selector).unwrap().into_iter().next().unwrap()
    }

    #[rstest]
    #[case("<article>Content</article>", "article", 10.0)]
    #[case("<section>Content</section>", "section", 8.0)]
    #[case("<div>Content</div>", "div", 5.0)]
    #[case("<blockquote>Quote</blockquote>", "blockquote", 3.0)]
    #[case("<pre>Code</pre>", "pre", 0.0)]
    #[case("<form>Form</form>", "form", -3.0)]
    #[case("<nav>Nav</nav>", "nav", -5.0)]
    fn test_base_tag_score(#[case] html: &str, #[case] selector: &str, #[case] expected: f64) {
        let doc = Document::parse(html).unwrap();
        assert_eq!(base_tag_score(&first(&doc, selector)), expected);
    }

    #[rstest]
    #[case(r#"<div class="article-content">x</div>"#, 25.0)]
    #[case(r#"<div id="main-content">x</div>"#, 25.0)]
    #[case(r#"<div class="sidebar">x</div>"#, -25.0)]
    #[case(r#"<div class="container" id="wrapper">x</div>"#, 0.0)]
    #[case(r#"<div id="share-bar" class="post">x</div>"#, -25.0)]
    fn test_class_id_weight(#[case] html: &str, #[case] expected: f64) {
        let doc = Document::parse(html).unwrap();
        assert_eq!(class_id_weight(&first(&doc, "div"), &ScoreConfig::default()), expected);
    }

    #[rstest]
    #[case("", 0)]
    #[case("abc", 3)]
    #[case("  a \n\n  b  ", 3)]
    #[case("one two", 7)]
    fn test_text_length(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(text_length(text), expected);
    }

    #[test]
    fn test_content_density_caps() {
        let text = format!("{}{}", "word, ".repeat(20), "x".repeat(400));
        let html = format!("<p>{text}</p>");
        let doc = Document::parse(&html).unwrap();
        assert_eq!(content_density_score(&first(&doc, "p"), &ScoreConfig::default()), 6.0);
    }

    #[test]
    fn test_link_density() {
        let doc = Document::parse(r#"<div><a href="/x">link</a>text</div>"#).unwrap();
        assert!((link_density(&first(&doc, "div")) - 0.5).abs() < f64::EPSILON);

        let doc = Document::parse("<div>plain text</div>").unwrap();
        assert_eq!(link_density(&first(&doc, "div")), 0.0);

        let doc = Document::parse("<div></div>").unwrap();
        assert_eq!(link_density(&first(&doc, "div")), 0.0);
    }

    #[test]
    fn test_calculate_score_penalizes_links() {
        let prose = "Plain prose, with commas, and enough words to matter. ".repeat(4);
        let html = format!(
            r#"<div id="a"><p>{prose}</p></div><div id="b"><a href="/1">{prose}</a></div>"#
        );
        let doc = Document::parse(&html).unwrap();
        let config = ScoreConfig::default();

        let text_score = calculate_score(&first(&doc, "#a"), &config);
        let link_score = calculate_score(&first(&doc, "#b"), &config);

        assert!(text_score.final_score > link_score.final_score);
        assert_eq!(link_score.link_density, 1.0);
    }
}
