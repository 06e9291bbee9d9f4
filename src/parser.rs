use tracing::debug;

use crate::block::{self, BlockType, FENCE};
use crate::config::TitlePolicy;
use crate::error::{Error, Result};
use crate::html::HtmlNode;
use crate::inline;
use crate::text::TextRun;

/// Parse markdown into an HTML tree rooted at a `div`.
pub fn render_document(markdown: &str) -> Result<HtmlNode> {
    let blocks = block::to_blocks(markdown);
    debug!(blocks = blocks.len(), "rendering document");

    let children = blocks
        .iter()
        .map(|block| block_to_html_node(block, block::classify(block)))
        .collect::<Result<Vec<_>>>()?;

    Ok(HtmlNode::parent("div", children))
}

/// Render a single classified block.
pub fn block_to_html_node(block: &str, block_type: BlockType) -> Result<HtmlNode> {
    match block_type {
        BlockType::Code => Ok(code_to_html_node(block)),
        BlockType::Heading(level) => {
            let content = join_lines(block[usize::from(level) + 1..].lines());
            Ok(HtmlNode::parent(
                format!("h{level}"),
                text_to_children(content.trim())?,
            ))
        }
        BlockType::Quote => {
            let content = join_lines(block.lines().map(|line| {
                let line = line.strip_prefix('>').unwrap_or(line);
                line.strip_prefix(' ').unwrap_or(line)
            }));
            Ok(HtmlNode::parent("blockquote", text_to_children(&content)?))
        }
        BlockType::UnorderedList => list_to_html_node("ul", block, |line| line.get(2..)),
        BlockType::OrderedList => {
            list_to_html_node("ol", block, |line| line.split_once(". ").map(|(_, item)| item))
        }
        BlockType::Paragraph => {
            let content = join_lines(block.lines());
            Ok(HtmlNode::parent("p", text_to_children(&content)?))
        }
    }
}

/// Soft-wrap lines into one, dropping trailing whitespace on each.
fn join_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.map(str::trim_end).collect::<Vec<_>>().join(" ")
}

fn code_to_html_node(block: &str) -> HtmlNode {
    let interior = block.strip_prefix(FENCE).unwrap_or(block);
    let interior = interior.strip_prefix('\n').unwrap_or(interior);
    let interior = interior.strip_suffix(FENCE).unwrap_or(interior);
    HtmlNode::parent("pre", vec![TextRun::code(interior).to_html_node()])
}

fn list_to_html_node(
    tag: &str,
    block: &str,
    strip_marker: impl Fn(&str) -> Option<&str>,
) -> Result<HtmlNode> {
    let items = block
        .lines()
        .map(|line| {
            let item = strip_marker(line).unwrap_or(line).trim_end();
            Ok(HtmlNode::parent("li", text_to_children(item)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(HtmlNode::parent(tag, items))
}

fn text_to_children(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(inline::tokenize(text)?
        .iter()
        .map(TextRun::to_html_node)
        .collect())
}

/// Text of the last `# ` heading in the document.
pub fn extract_title(markdown: &str) -> Result<String> {
    extract_title_with(markdown, TitlePolicy::Last)
}

/// Text of a `# ` heading in the document, chosen by `policy` when there
/// are several.
pub fn extract_title_with(markdown: &str, policy: TitlePolicy) -> Result<String> {
    let mut title = None;
    let blocks = block::to_blocks(markdown);
    let headings = blocks
        .iter()
        .flat_map(|block| block.lines())
        .filter_map(|line| line.strip_prefix("# "));

    for heading in headings {
        title = Some(heading.trim().to_string());
        if policy == TitlePolicy::First {
            break;
        }
    }

    title.ok_or(Error::NoTitleFound)
}

/// Convert markdown straight to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    render_document(markdown)?.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn heading_and_paragraph() {
        let md = "# Title\n\nHello **world**";
        assert_eq!(
            markdown_to_html(md).unwrap(),
            "<div><h1>Title</h1><p>Hello <b>world</b></p></div>"
        );
        assert_eq!(extract_title(md).unwrap(), "Title");
    }

    #[test]
    fn paragraphs() {
        let md = "
    This is **bolded** paragraph
    text in a p
    tag here

    This is another paragraph with *italic* text and `code` here

    ";
        assert_eq!(
            markdown_to_html(md).unwrap(),
            "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p><p>This is another paragraph with <i>italic</i> text and <code>code</code> here</p></div>"
        );
    }

    #[test]
    fn code_block_is_not_tokenized() {
        let md = "
    ```
    This is text that *should* remain
    the **same** even with inline stuff
    ```
    ";
        assert_eq!(
            markdown_to_html(md).unwrap(),
            "<div><pre><code>This is text that *should* remain\nthe **same** even with inline stuff\n</code></pre></div>"
        );
    }

    #[test]
    fn fenced_raw_text() {
        assert_eq!(
            markdown_to_html("```\nraw *text*\n```").unwrap(),
            "<div><pre><code>raw *text*\n</code></pre></div>"
        );
    }

    #[test]
    fn code_block_keeps_trailing_whitespace() {
        assert_eq!(
            markdown_to_html("```\nx   \n  y\t\n```").unwrap(),
            "<div><pre><code>x   \n  y\t\n</code></pre></div>"
        );
    }

    #[test]
    fn soft_wrapped_lines_drop_trailing_whitespace() {
        assert_eq!(
            markdown_to_html("one  \ntwo\t\n\n> a \n> b\n\n- c  \n- d").unwrap(),
            "<div><p>one two</p><blockquote>a b</blockquote><ul><li>c</li><li>d</li></ul></div>"
        );
    }

    #[test]
    fn fence_with_text_on_opening_line() {
        assert_eq!(
            markdown_to_html("```code here\n```").unwrap(),
            "<div><pre><code>code here\n</code></pre></div>"
        );
    }

    #[test]
    fn code_block_keeps_unbalanced_delimiters() {
        assert_eq!(
            markdown_to_html("```\nlet s = \"`\";\n```").unwrap(),
            "<div><pre><code>let s = \"`\";\n</code></pre></div>"
        );
    }

    #[rstest]
    #[case("# One", "<h1>One</h1>")]
    #[case("### Three *levels*", "<h3>Three <i>levels</i></h3>")]
    #[case("###### Six", "<h6>Six</h6>")]
    #[case("## Wrapped\nheading", "<h2>Wrapped heading</h2>")]
    fn headings(#[case] md: &str, #[case] html: &str) {
        assert_eq!(markdown_to_html(md).unwrap(), format!("<div>{html}</div>"));
    }

    #[test]
    fn quote() {
        assert_eq!(
            markdown_to_html("> All that is gold\n>does not **glitter**").unwrap(),
            "<div><blockquote>All that is gold does not <b>glitter</b></blockquote></div>"
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            markdown_to_html("- one\n* `two`\n- [three](/3)").unwrap(),
            "<div><ul><li>one</li><li><code>two</code></li><li><a href=\"/3\">three</a></li></ul></div>"
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(
            markdown_to_html("1. first\n2. **second**\n3. third").unwrap(),
            "<div><ol><li>first</li><li><b>second</b></li><li>third</li></ol></div>"
        );
    }

    #[test]
    fn ordered_list_with_gap_is_a_paragraph() {
        assert_eq!(
            markdown_to_html("1. a\n3. b").unwrap(),
            "<div><p>1. a 3. b</p></div>"
        );
    }

    #[test]
    fn image_paragraph() {
        assert_eq!(
            markdown_to_html("![a cat](/cat.png)").unwrap(),
            "<div><p><img src=\"/cat.png\" alt=\"a cat\"></img></p></div>"
        );
    }

    #[test]
    fn empty_document() {
        assert_eq!(markdown_to_html("").unwrap(), "<div></div>");
        assert_eq!(markdown_to_html("\n \n\n").unwrap(), "<div></div>");
    }

    #[test]
    fn malformed_inline_fails_whole_document() {
        let result = render_document("# Fine\n\nBroken *emphasis");
        assert!(matches!(result, Err(Error::MalformedInlineSyntax { .. })));
    }

    #[test]
    fn block_tree_shape() {
        let root = render_document("- a\n- b\n\ntext").unwrap();
        assert_eq!(root.tag(), Some("div"));
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].tag(), Some("ul"));
        assert_eq!(root.children()[0].children().len(), 2);
        assert_eq!(root.children()[1].tag(), Some("p"));
    }

    #[test]
    fn rendering_twice_is_identical() {
        let root = render_document("# T\n\n> q\n\n1. x").unwrap();
        assert_eq!(root.render().unwrap(), root.render().unwrap());
    }

    #[rstest]
    #[case("# Hello", "Hello")]
    #[case("#  Hello   ", "Hello")]
    #[case("## Hello\n# World", "World")]
    #[case("Intro\n\n# Real title\n\nbody", "Real title")]
    fn titles(#[case] md: &str, #[case] title: &str) {
        assert_eq!(extract_title(md).unwrap(), title);
    }

    #[test]
    fn last_title_wins_by_default() {
        let md = "# First\n\n# Second";
        assert_eq!(extract_title(md).unwrap(), "Second");
        assert_eq!(extract_title_with(md, TitlePolicy::Last).unwrap(), "Second");
        assert_eq!(extract_title_with(md, TitlePolicy::First).unwrap(), "First");
    }

    #[rstest]
    #[case("no heading here")]
    #[case("## Only a subheading")]
    #[case("#NoSpace")]
    #[case("")]
    fn missing_title(#[case] md: &str) {
        assert_eq!(extract_title(md), Err(Error::NoTitleFound));
    }
}
