use crate::Document;

/// Title separators that usually split the article title from the site name.
const TITLE_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", " :: ", " / ", " » ", " · "];

/// Page-level metadata used to build the article
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub site_name: Option<String>,
}

impl Document {
    /// Extract title with priority fallback:
    /// 1. JSON-LD `headline` / `name`
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    /// 4. Meta `DC.title`
    /// 5. `<title>` element with the site suffix removed
    /// 6. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(value) = ["headline", "name"]
                .iter()
                .find_map(|key| json_ld.get(*key).and_then(|v| v.as_str()).and_then(non_empty))
        {
            return Some(value);
        }

        let from_meta = ["og:title", "twitter:title", "DC.title", "dc:title"]
            .iter()
            .find_map(|name| self.get_meta_content(name).and_then(|v| non_empty(&v)));
        if from_meta.is_some() {
            return from_meta;
        }

        if let Some(title) = self.title().and_then(|t| non_empty(&t)) {
            return Some(clean_document_title(&title));
        }

        self.select("h1")
            .ok()?
            .first()
            .and_then(|h1| non_empty(&h1.text()))
    }

    /// Extract site name with priority fallback:
    /// 1. JSON-LD `publisher.name`
    /// 2. Open Graph `og:site_name`
    pub fn extract_site_name(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(name) = json_ld
                .get("publisher")
                .and_then(|p| p.get("name"))
                .and_then(|n| n.as_str())
                .and_then(non_empty)
        {
            return Some(name);
        }

        self.get_meta_content("og:site_name").and_then(|v| non_empty(&v))
    }

    /// Extract all metadata at once
    pub fn extract_metadata(&self) -> Metadata {
        Metadata { title: self.extract_title(), site_name: self.extract_site_name() }
    }

    /// Get meta tag content by name or property attribute
    fn get_meta_content(&self, attr: &str) -> Option<String> {
        ["name", "property"].iter().find_map(|kind| {
            let selector = format!("meta[{kind}=\"{attr}\"]");
            self.select(&selector)
                .ok()?
                .first()
                .and_then(|el| el.attr("content"))
                .map(str::to_string)
        })
    }

    /// First JSON-LD object describing an article-like entity.
    ///
    /// Handles top-level arrays and `@graph` wrappers.
    fn extract_json_ld(&self) -> Option<serde_json::Value> {
        let scripts = self.select("script[type=\"application/ld+json\"]").ok()?;

        scripts
            .iter()
            .filter_map(|el| serde_json::from_str::<serde_json::Value>(el.text().trim()).ok())
            .flat_map(|value| match value {
                serde_json::Value::Array(items) => items,
                serde_json::Value::Object(ref obj) if obj.contains_key("@graph") => {
                    obj["@graph"].as_array().cloned().unwrap_or_default()
                }
                other => vec![other],
            })
            .find(is_article_json_ld)
    }
}

fn is_article_json_ld(value: &serde_json::Value) -> bool {
    const ARTICLE_TYPES: &[&str] = &[
        "Article",
        "NewsArticle",
        "BlogPosting",
        "Report",
        "ScholarlyArticle",
        "TechArticle",
        "CreativeWork",
        "WebPage",
    ];

    match value.get("@type") {
        Some(serde_json::Value::String(t)) => ARTICLE_TYPES.contains(&t.as_str()),
        Some(serde_json::Value::Array(types)) => types
            .iter()
            .filter_map(|t| t.as_str())
            .any(|t| ARTICLE_TYPES.contains(&t)),
        _ => false,
    }
}

/// Strip a trailing (or leading) site name from a `<title>` value.
///
/// The part before the last separator is kept when it still has at least
/// three words; otherwise the part after the first separator is tried, and
/// failing both the title is returned as-is.
pub fn clean_document_title(title: &str) -> String {
    let title = collapse_whitespace(title);

    let Some(separator) = TITLE_SEPARATORS.iter().find(|sep| title.contains(**sep)) else {
        return title;
    };

    if let Some((head, _)) = title.rsplit_once(separator)
        && word_count(head) >= 3
    {
        return head.trim().to_string();
    }

    if let Some((_, tail)) = title.split_once(separator)
        && word_count(tail) >= 3
    {
        return tail.trim().to_string();
    }

    title
}

fn non_empty(value: &str) -> Option<String> {
    let value = collapse_whitespace(value);
    if value.is_empty() { None } else { Some(value) }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
