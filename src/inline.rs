use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::{Error, Result};
use crate::text::{TextKind, TextRun};

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Split inline markdown into typed runs.
///
/// Stages run in a fixed order, each one only re-splitting the plain runs left
/// by the previous stage: code, bold, italic, images, links. Code spans
/// therefore protect their contents, and a link wrapped in `**` stays bold.
pub fn tokenize(text: &str) -> Result<Vec<TextRun>> {
    let runs = vec![TextRun::plain(text)];
    let runs = split_delimiter(runs, "`", TextKind::Code)?;
    let runs = split_delimiter(runs, "**", TextKind::Bold)?;
    let runs = split_delimiter(runs, "*", TextKind::Italic)?;
    let runs = split_images(runs)?;
    let runs = split_links(runs)?;
    trace!(runs = runs.len(), "tokenized inline text");
    Ok(runs)
}

/// Split every plain run on `delimiter`, typing the delimited parts as `kind`.
///
/// Empty parts are dropped. An odd number of delimiters in a run is an error.
pub fn split_delimiter(
    runs: Vec<TextRun>,
    delimiter: &str,
    kind: TextKind,
) -> Result<Vec<TextRun>> {
    if delimiter.is_empty() {
        return Ok(runs);
    }

    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        if !run.is_plain() {
            out.push(run);
            continue;
        }

        let text = run.text.as_str();
        let mut cursor = 0;
        let mut delimited = false;
        while let Some(offset) = text[cursor..].find(delimiter) {
            let end = cursor + offset;
            push_part(&mut out, &text[cursor..end], delimited, &kind);
            cursor = end + delimiter.len();
            delimited = !delimited;
        }

        if delimited {
            return Err(Error::MalformedInlineSyntax {
                marker: delimiter.to_string(),
                text: run.text,
            });
        }
        push_part(&mut out, &text[cursor..], false, &kind);
    }
    Ok(out)
}

fn push_part(out: &mut Vec<TextRun>, part: &str, delimited: bool, kind: &TextKind) {
    if part.is_empty() {
        return;
    }
    let kind = if delimited { kind.clone() } else { TextKind::Plain };
    out.push(TextRun::new(part, kind));
}

/// `(alt, url)` pairs for every `![alt](url)` in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// `(text, url)` pairs for every `[text](url)` in `text` that is not part of
/// image syntax.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    LINK_RE
        .captures_iter(text)
        .filter(|caps| caps.get(0).is_some_and(|m| !text[..m.start()].ends_with('!')))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

pub fn split_images(runs: Vec<TextRun>) -> Result<Vec<TextRun>> {
    split_markers(runs, Marker::Image)
}

pub fn split_links(runs: Vec<TextRun>) -> Result<Vec<TextRun>> {
    split_markers(runs, Marker::Link)
}

#[derive(Clone, Copy)]
enum Marker {
    Image,
    Link,
}

impl Marker {
    fn extract(self, text: &str) -> Vec<(String, String)> {
        match self {
            Marker::Image => extract_images(text),
            Marker::Link => extract_links(text),
        }
    }

    fn literal(self, label: &str, url: &str) -> String {
        match self {
            Marker::Image => format!("![{label}]({url})"),
            Marker::Link => format!("[{label}]({url})"),
        }
    }

    fn run(self, label: String, url: String) -> TextRun {
        match self {
            Marker::Image => TextRun::image(label, url),
            Marker::Link => TextRun::link(label, url),
        }
    }

    /// Byte offset of the first occurrence of `literal` that belongs to this
    /// marker kind.
    fn locate(self, haystack: &str, literal: &str) -> Option<usize> {
        haystack
            .match_indices(literal)
            .map(|(start, _)| start)
            .find(|&start| match self {
                Marker::Image => true,
                Marker::Link => !haystack[..start].ends_with('!'),
            })
    }
}

fn split_markers(runs: Vec<TextRun>, marker: Marker) -> Result<Vec<TextRun>> {
    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        if !run.is_plain() {
            out.push(run);
            continue;
        }

        let found = marker.extract(&run.text);
        if found.is_empty() {
            out.push(run);
            continue;
        }

        let mut remaining = run.text.as_str();
        for (label, url) in found {
            let literal = marker.literal(&label, &url);
            let Some(start) = marker.locate(remaining, &literal) else {
                return Err(Error::MalformedInlineSyntax {
                    marker: literal,
                    text: run.text.clone(),
                });
            };
            if start > 0 {
                out.push(TextRun::plain(&remaining[..start]));
            }
            out.push(marker.run(label, url));
            remaining = &remaining[start + literal.len()..];
        }
        if !remaining.is_empty() {
            out.push(TextRun::plain(remaining));
        }
    }
    Ok(out)
}
