use std::fmt;

use crate::html::HtmlNode;

/// The type of an inline run. Links and images carry their target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link { url: String },
    Image { url: String },
}

impl TextKind {
    pub fn name(&self) -> &'static str {
        match self {
            TextKind::Plain => "text",
            TextKind::Bold => "bold",
            TextKind::Italic => "italic",
            TextKind::Code => "code",
            TextKind::Link { .. } => "link",
            TextKind::Image { .. } => "image",
        }
    }
}

/// A typed span of inline text produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub kind: TextKind,
}

impl TextRun {
    pub fn new(text: impl Into<String>, kind: TextKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TextKind::Plain)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, TextKind::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, TextKind::Italic)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::new(text, TextKind::Code)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, TextKind::Link { url: url.into() })
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(alt, TextKind::Image { url: url.into() })
    }

    pub fn is_plain(&self) -> bool {
        self.kind == TextKind::Plain
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            TextKind::Link { url } | TextKind::Image { url } => Some(url.as_str()),
            _ => None,
        }
    }

    /// Convert to the leaf node it renders as.
    pub fn to_html_node(&self) -> HtmlNode {
        match &self.kind {
            TextKind::Plain => HtmlNode::text(&self.text),
            TextKind::Bold => HtmlNode::leaf("b", &self.text),
            TextKind::Italic => HtmlNode::leaf("i", &self.text),
            TextKind::Code => HtmlNode::leaf("code", &self.text),
            TextKind::Link { url } => HtmlNode::leaf("a", &self.text).with_attribute("href", url),
            TextKind::Image { url } => HtmlNode::leaf("img", "")
                .with_attribute("src", url)
                .with_attribute("alt", &self.text),
        }
    }
}

impl fmt::Display for TextRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextRun({}, {}, {})",
            self.text,
            self.kind.name(),
            self.url().unwrap_or("None")
        )
    }
}
