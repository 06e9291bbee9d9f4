mod block;
mod config;
mod error;
mod html;
mod inline;
mod page;
mod parser;
mod text;

pub use block::{BlockType, classify, heading_level, to_blocks};
pub use config::{Config, ConfigError, PageConfig, TitleConfig, TitlePolicy};
pub use error::{Error, Result};
pub use html::{Attributes, HtmlNode};
pub use inline::{
    extract_images, extract_links, split_delimiter, split_images, split_links, tokenize,
};
pub use page::{CONTENT_PLACEHOLDER, DEFAULT_TEMPLATE, Page, TITLE_PLACEHOLDER, render_page};
pub use parser::{block_to_html_node, extract_title, extract_title_with, render_document};
pub use text::{TextKind, TextRun};

/// Convert markdown to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    parser::markdown_to_html(markdown)
}

/// Convert markdown to a full page using the template and title policy from `config`.
pub fn markdown_to_page_with_config(
    markdown: &str,
    template: &str,
    config: &Config,
) -> Result<Page> {
    render_page(markdown, template, config.title.policy)
}
