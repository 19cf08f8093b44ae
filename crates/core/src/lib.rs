//! Save the readable part of a web page as Markdown.
//!
//! The pipeline is four stages, each returning [`Result`]:
//!
//! 1. [`fetch_url`] downloads the page.
//! 2. [`Readability`] isolates the article and its metadata.
//! 3. [`MarkdownFormatter`] converts the body and composes the document.
//! 4. [`write_markdown`] saves it as `<title>.md`.
//!
//! [`run`] chains them.

pub mod article;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod metadata;
pub mod output;
pub mod parse;
pub mod postprocess;
pub mod preprocess;
pub mod readability;
pub mod scoring;
pub mod workflow;

pub use article::Article;
pub use error::{ClipdownError, Result};
#[doc(hidden)]
pub use extract::{ExtractConfig, ExtractedContent};
pub use extract::extract_content;
pub use fetch::{FetchConfig, fetch_url, parse_page_url};
pub use formatters::{MarkdownConfig, MarkdownFormatter, compose_document, convert_to_markdown, prepare_markup};
pub use metadata::Metadata;
pub use output::{output_path, write_markdown};
pub use parse::{Document, Element};
#[doc(hidden)]
pub use postprocess::PostProcessConfig;
pub use postprocess::postprocess_html;
#[doc(hidden)]
pub use preprocess::PreprocessConfig;
pub use preprocess::preprocess_html;
pub use readability::{Readability, ReadabilityConfig, ReadabilityConfigBuilder};
#[doc(hidden)]
pub use scoring::{ScoreConfig, ScoreResult, calculate_score, link_density};
pub use workflow::{RunConfig, RunReport, run};
