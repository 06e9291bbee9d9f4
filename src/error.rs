use thiserror::Error;

/// Errors raised while turning markdown into HTML.
///
/// Every error is terminal for the document being processed: no partial
/// output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An unmatched delimiter, or an image/link marker whose literal text
    /// could not be located in its run.
    #[error("Invalid markdown: unmatched or misplaced `{marker}` in {text:?}")]
    MalformedInlineSyntax { marker: String, text: String },

    #[error("Leaf node <{}> has no value", .tag.as_deref().unwrap_or("text"))]
    MissingLeafValue { tag: Option<String> },

    #[error("Parent node has no tag")]
    MissingTag,

    #[error("No level 1 heading found")]
    NoTitleFound,

    #[error("Template is missing the `{placeholder}` placeholder")]
    Template { placeholder: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
