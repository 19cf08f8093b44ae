pub mod markdown;

pub use markdown::{MarkdownConfig, MarkdownFormatter, compose_document, convert_to_markdown, prepare_markup};
