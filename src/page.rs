use tracing::debug;

use crate::config::TitlePolicy;
use crate::error::{Error, Result};
use crate::parser;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

pub const DEFAULT_TEMPLATE: &str = "<!doctype html>
<html>
<head>
<meta charset=\"utf-8\">
<title>{{ Title }}</title>
</head>
<body>
<article>
{{ Content }}
</article>
</body>
</html>
";

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    /// The rendered document, without the template.
    pub content: String,
    /// The template with title and content substituted.
    pub html: String,
}

/// Render `markdown` into `template`.
///
/// The document must have a level 1 heading, and the template must contain
/// both placeholders.
pub fn render_page(markdown: &str, template: &str, policy: TitlePolicy) -> Result<Page> {
    for placeholder in [TITLE_PLACEHOLDER, CONTENT_PLACEHOLDER] {
        if !template.contains(placeholder) {
            return Err(Error::Template { placeholder });
        }
    }

    let content = parser::markdown_to_html(markdown)?;
    let title = parser::extract_title_with(markdown, policy)?;
    debug!(%title, bytes = content.len(), "rendered page");

    let html = template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content);

    Ok(Page {
        title,
        content,
        html,
    })
}
