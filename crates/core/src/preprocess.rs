//! Page cleanup before scoring.
//!
//! A single `lol_html` pass removes non-content tags, hidden elements and
//! unlikely candidates, and makes links absolute against the page URL.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Tags whose content never belongs in an article.
const STRIPPED_TAGS: &str = "script, style, noscript, iframe, svg, canvas, object, embed, template";

/// Tags never removed as unlikely candidates, whatever their class says.
const PROTECTED_TAGS: &[&str] = &["html", "body", "article", "main", "a"];

/// ARIA roles that mark page chrome.
const UNLIKELY_ROLES: &[&str] = &[
    "menu",
    "menubar",
    "complementary",
    "navigation",
    "alert",
    "alertdialog",
    "dialog",
];

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("COMMENT_RE should compile"));

static UNLIKELY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_RE should compile")
});

static MAYBE_CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|mathjax|shadow").expect("MAYBE_CANDIDATE_RE should compile")
});

static HIDDEN_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").expect("HIDDEN_STYLE_RE should compile")
});

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Remove elements whose class/id/role marks them as page chrome
    pub remove_unlikely: bool,
    /// Remove elements hidden with inline styles or the `hidden` attribute
    pub remove_hidden: bool,
    /// Rewrite relative `href`/`src` values against `base_url`
    pub convert_urls: bool,
    /// URL the page was fetched from
    pub base_url: Option<Url>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { remove_unlikely: true, remove_hidden: true, convert_urls: true, base_url: None }
    }
}

/// Cleans raw page HTML ahead of parsing and scoring.
///
/// On a rewriter failure the comment-stripped input is returned unchanged.
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let html = COMMENT_RE.replace_all(html, "");
    let base_url = if config.convert_urls { config.base_url.as_ref() } else { None };
    let remove_unlikely = config.remove_unlikely;
    let remove_hidden = config.remove_hidden;

    let mut handlers = vec![lol_html::element!(STRIPPED_TAGS, |el| {
        el.remove();
        Ok(())
    })];

    if remove_unlikely || remove_hidden {
        handlers.push(lol_html::element!("*", move |el| {
            let tag = el.tag_name();
            let style = el.get_attribute("style");

            if remove_hidden
                && (el.has_attribute("hidden")
                    || el.get_attribute("aria-hidden").as_deref() == Some("true")
                    || style.as_deref().is_some_and(|s| HIDDEN_STYLE_RE.is_match(s)))
            {
                el.remove();
                return Ok(());
            }

            if remove_unlikely && !PROTECTED_TAGS.contains(&tag.as_str()) {
                let class = el.get_attribute("class").unwrap_or_default();
                let id = el.get_attribute("id").unwrap_or_default();
                let role = el.get_attribute("role");
                if is_unlikely_candidate(&class, &id, role.as_deref()) {
                    el.remove();
                }
            }

            Ok(())
        }));
    }

    if let Some(base) = base_url {
        handlers.push(lol_html::element!("a[href]", move |el| {
            if let Some(href) = el.get_attribute("href")
                && let Some(absolute) = resolve_url(base, &href)
            {
                el.set_attribute("href", &absolute).ok();
            }
            Ok(())
        }));
        handlers.push(lol_html::element!("img[src]", move |el| {
            if let Some(src) = el.get_attribute("src")
                && let Some(absolute) = resolve_url(base, &src)
            {
                el.set_attribute("src", &absolute).ok();
            }
            Ok(())
        }));
    }

    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings { element_content_handlers: handlers, ..Default::default() },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if let Err(e) = rewriter.write(html.as_bytes()) {
        tracing::warn!(error = %e, "preprocessing failed, using unprocessed HTML");
        return html.into_owned();
    }
    if let Err(e) = rewriter.end() {
        tracing::warn!(error = %e, "preprocessing failed, using unprocessed HTML");
        return html.into_owned();
    }

    String::from_utf8_lossy(&output).into_owned()
}

/// Class, id and role test for page chrome.
///
/// Class and id are matched together, so `class="has-sidebar" id="page-content"`
/// is kept because the combined string also looks like content.
pub fn is_unlikely_candidate(class: &str, id: &str, role: Option<&str>) -> bool {
    if role.is_some_and(|r| UNLIKELY_ROLES.contains(&r)) {
        return true;
    }

    let match_string = format!("{class} {id}");
    UNLIKELY_RE.is_match(&match_string) && !MAYBE_CANDIDATE_RE.is_match(&match_string)
}

/// Makes `reference` absolute against `base`.
///
/// In-page anchors and `javascript:` links are left alone.
pub fn resolve_url(base: &Url, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() || reference.starts_with('#') || reference.starts_with("javascript:") {
        return None;
    }

    base.join(reference).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_removes_non_content_tags() {
        let html = r#"
            <html>
                <head><script>alert('test');</script><style>body{color:red;}</style></head>
                <body>
                    <noscript>Enable JavaScript</noscript>
                    <iframe src="https://example.com"></iframe>
                    <svg><rect width="100" height="100"/></svg>
                    <canvas id="chart"></canvas>
                    <p>Content</p>
                </body>
            </html>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(!result.contains("alert"));
        assert!(!result.contains("color:red"));
        assert!(!result.contains("Enable JavaScript"));
        assert!(!result.contains("<iframe"));
        assert!(!result.contains("<svg"));
        assert!(!result.contains("<canvas"));
        assert!(result.contains("<p>Content</p>"));
    }

    #[test]
    fn test_removes_comments() {
        let html = "<p>Before<!-- hidden\nnote -->After</p>";
        let result = preprocess_html(html, &PreprocessConfig::default());
        assert_eq!(result, "<p>BeforeAfter</p>");
    }

    #[test]
    fn test_removes_hidden_elements() {
        let html = r#"<div><p style="display: none">Gone</p><p hidden>Also gone</p><p aria-hidden="true">Still gone</p><p>Kept</p></div>"#;
        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(!result.contains("Gone"));
        assert!(!result.contains("Also gone"));
        assert!(!result.contains("Still gone"));
        assert!(result.contains("Kept"));
    }

    #[test]
    fn test_removes_unlikely_candidates() {
        let html = r#"<body><div class="sidebar">Ads</div><nav role="navigation">Menu</nav><div class="content">Story</div></body>"#;
        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(!result.contains("Ads"));
        assert!(!result.contains("Menu"));
        assert!(result.contains("Story"));
    }

    #[test]
    fn test_keeps_unlikely_when_disabled() {
        let html = r#"<div class="sidebar">Ads</div>"#;
        let config = PreprocessConfig { remove_unlikely: false, ..Default::default() };
        let result = preprocess_html(html, &config);
        assert!(result.contains("Ads"));
    }

    #[test]
    fn test_converts_relative_urls() {
        let html = r##"<a href="/about">About</a><img src="img/photo.jpg"><a href="#top">Top</a>"##;
        let config = PreprocessConfig {
            base_url: Some(Url::parse("https://example.com/blog/post").unwrap()),
            ..Default::default()
        };

        let result = preprocess_html(html, &config);
        assert!(result.contains(r#"href="https://example.com/about""#));
        assert!(result.contains(r#"src="https://example.com/blog/img/photo.jpg""#));
        assert!(result.contains(r##"href="#top""##));
    }

    #[rstest]
    #[case("sidebar", "", None, true)]
    #[case("comment-list", "", None, true)]
    #[case("has-sidebar", "page-content", None, false)]
    #[case("article-body", "", None, false)]
    #[case("", "", Some("navigation"), true)]
    #[case("", "", Some("main"), false)]
    #[case("entry", "post-1", None, false)]
    fn test_is_unlikely_candidate(
        #[case] class: &str, #[case] id: &str, #[case] role: Option<&str>, #[case] expected: bool,
    ) {
        assert_eq!(is_unlikely_candidate(class, id, role), expected);
    }

    #[rstest]
    #[case("/a/b", Some("https://example.com/a/b"))]
    #[case("c", Some("https://example.com/dir/c"))]
    #[case("https://other.org/x", Some("https://other.org/x"))]
    #[case("#frag", None)]
    #[case("javascript:void(0)", None)]
    #[case("   ", None)]
    fn test_resolve_url(#[case] reference: &str, #[case] expected: Option<&str>) {
        let base = Url::parse("https://example.com/dir/page").unwrap();
        assert_eq!(resolve_url(&base, reference).as_deref(), expected);
    }
}
