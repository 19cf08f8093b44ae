use std::cmp::Ordering;
use std::collections::HashMap;

use crate::parse::{Document, Element};
use crate::postprocess::{PostProcessConfig, postprocess_html};
use crate::scoring::{ScoreConfig, calculate_score, link_density, text_length};
use crate::{ClipdownError, Result};

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Minimum score the winning candidate must reach
    pub min_score_threshold: f64,
    /// Number of top candidates consulted when looking for a shared ancestor
    pub max_top_candidates: usize,
    /// Minimum character threshold for content
    pub char_threshold: usize,
    /// Maximum number of candidates scored, 0 for no limit
    pub max_elements: usize,
    /// Sibling score threshold (multiplier of top score)
    pub sibling_threshold: f64,
    /// Post-processing configuration
    pub postprocess: PostProcessConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_score_threshold: 20.0,
            max_top_candidates: 5,
            char_threshold: 500,
            max_elements: 0,
            sibling_threshold: 0.2,
            postprocess: PostProcessConfig::default(),
        }
    }
}

/// The result of content extraction
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Cleaned HTML of the article body
    pub content: String,
    /// Score of the winning candidate
    pub top_score: f64,
    /// Number of top-level elements in `content`
    pub element_count: usize,
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    element: Element<'a>,
    score: f64,
}

/// Tags that are considered potential content containers
const CANDIDATE_TAGS: &[&str] = &["div", "article", "section", "main", "p", "td", "pre", "blockquote"];

/// Containers scored regardless of how much text they hold directly
const CONTAINER_TAGS: &[&str] = &["article", "section", "main"];

/// Ancestors never promoted to candidates
const ROOT_TAGS: &[&str] = &["html", "body"];

/// How many close runners-up must share an ancestor before it replaces the winner
const MIN_SHARED_CANDIDATES: usize = 3;

fn identify_candidates<'a>(
    doc: &'a Document, config: &ExtractConfig, score_config: &ScoreConfig,
) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();
    let max_elements = if config.max_elements == 0 { usize::MAX } else { config.max_elements };
    let min_chars = config.char_threshold / 10;

    let Ok(elements) = doc.select(&CANDIDATE_TAGS.join(", ")) else {
        return candidates;
    };

    for element in elements {
        let tag = element.tag_name();
        if !CONTAINER_TAGS.contains(&tag.as_str()) && text_length(&element.text()) < min_chars {
            continue;
        }

        if candidates.len() >= max_elements {
            tracing::debug!(max_elements, "element scan limit reached");
            break;
        }

        let score = calculate_score(&element, score_config).final_score;
        candidates.push(Candidate { element, score });
    }

    candidates
}

/// Adds half of each candidate's score to its parent and a third to its
/// grandparent, scoring ancestors that were not candidates yet.
fn propagate_scores<'a>(candidates: &mut Vec<Candidate<'a>>, score_config: &ScoreConfig) {
    let mut index = HashMap::new();
    for (i, candidate) in candidates.iter().enumerate() {
        index.insert(candidate.element.node().id(), i);
    }

    let seeds: Vec<Candidate<'a>> = candidates.clone();
    for seed in seeds {
        let mut ancestor = seed.element.parent();
        for divider in [2.0, 3.0] {
            let Some(node) = ancestor else { break };
            if ROOT_TAGS.contains(&node.tag_name().as_str()) {
                break;
            }

            let i = *index.entry(node.node().id()).or_insert_with(|| {
                let score = calculate_score(&node, score_config).final_score;
                candidates.push(Candidate { element: node, score });
                candidates.len() - 1
            });
            candidates[i].score += seed.score / divider;
            ancestor = node.parent();
        }
    }
}

fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    a.score
        .partial_cmp(&b.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| candidate_priority(&a.element.tag_name()).cmp(&candidate_priority(&b.element.tag_name())))
        .then_with(|| text_length(&a.element.text()).cmp(&text_length(&b.element.text())))
}

fn candidate_priority(tag_name: &str) -> u8 {
    match tag_name {
        "article" | "main" | "section" => 3,
        "div" => 2,
        _ => 1,
    }
}

/// When several close runners-up live under one ancestor of the winner, that
/// ancestor holds the article and the winner is only a fragment of it.
fn promote_shared_ancestor<'a>(ranked: &[Candidate<'a>], config: &ExtractConfig) -> Candidate<'a> {
    let top = ranked[0];
    let runners_up: Vec<&Candidate<'a>> = ranked
        .iter()
        .take(config.max_top_candidates.max(1))
        .skip(1)
        .filter(|c| top.score > 0.0 && c.score / top.score >= 0.75)
        .collect();

    if runners_up.len() < MIN_SHARED_CANDIDATES {
        return top;
    }

    let mut ancestor = top.element.parent();
    while let Some(node) = ancestor {
        if ROOT_TAGS.contains(&node.tag_name().as_str()) {
            break;
        }
        let shared = runners_up.iter().filter(|c| c.element.is_descendant_of(&node)).count();
        if shared >= MIN_SHARED_CANDIDATES {
            let score = ranked
                .iter()
                .find(|c| c.element.same_node(&node))
                .map_or(top.score, |c| c.score.max(top.score));
            tracing::debug!(tag = %node.tag_name(), shared, "promoting shared ancestor");
            return Candidate { element: node, score };
        }
        ancestor = node.parent();
    }

    top
}

/// Siblings of the winner, in document order, that also look like article
/// content. The winner itself is included at its position.
fn collect_with_siblings<'a>(
    top: &Candidate<'a>, ranked: &[Candidate<'a>], config: &ExtractConfig,
) -> Vec<Element<'a>> {
    let Some(parent) = top.element.parent() else {
        return vec![top.element];
    };
    if parent.tag_name() == "html" {
        return vec![top.element];
    }

    let threshold = (top.score * config.sibling_threshold).max(10.0);
    let top_class = top.element.attr("class").filter(|c| !c.is_empty());

    parent
        .children()
        .into_iter()
        .filter(|sibling| {
            if sibling.same_node(&top.element) {
                return true;
            }

            let mut score = ranked
                .iter()
                .find(|c| c.element.same_node(sibling))
                .map_or(0.0, |c| c.score);
            if top_class.is_some() && sibling.attr("class") == top_class {
                score += top.score * 0.2;
            }
            if score >= threshold {
                return true;
            }

            if sibling.tag_name() == "p" {
                let length = text_length(&sibling.text());
                let density = link_density(sibling);
                return (length > 80 && density < 0.25)
                    || (length > 0 && length <= 80 && density == 0.0 && sibling.text().trim_end().ends_with('.'));
            }

            false
        })
        .collect()
}

/// Extract the main content from a document
///
/// 1. Score candidate elements
/// 2. Propagate scores to parents and grandparents
/// 3. Pick the winner, promoting a shared ancestor of close runners-up
/// 4. Gather qualifying siblings
/// 5. Post-process the assembled HTML
pub fn extract_content(doc: &Document, config: &ExtractConfig) -> Result<ExtractedContent> {
    let score_config = ScoreConfig::default();

    let mut candidates = identify_candidates(doc, config, &score_config);
    propagate_scores(&mut candidates, &score_config);
    candidates.sort_by(|a, b| compare_candidates(b, a));

    if candidates.is_empty() {
        return Err(ClipdownError::NoContent);
    }

    let top = promote_shared_ancestor(&candidates, config);
    tracing::debug!(
        candidates = candidates.len(),
        tag = %top.element.tag_name(),
        score = top.score,
        "selected top candidate"
    );

    if top.score < config.min_score_threshold {
        return Err(ClipdownError::NotReadable { score: top.score, threshold: config.min_score_threshold });
    }

    let elements = collect_with_siblings(&top, &candidates, config);
    let content = elements
        .iter()
        .map(Element::outer_html)
        .collect::<Vec<_>>()
        .join("\n");
    let content = postprocess_html(&content, &config.postprocess);

    Ok(ExtractedContent { content, top_score: top.score, element_count: elements.len() })
}
