/// Classification of a top-level markdown block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

pub const FENCE: &str = "```";

/// Split a document into blocks separated by blank lines.
///
/// A blank line is any whitespace-only line. Each block loses its common
/// indentation and is trimmed at its edges; whitespace inside the block is
/// kept. The returned blocks are never empty.
pub fn to_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        if line.trim().is_empty() {
            flush_block(&mut current, &mut blocks);
        } else {
            current.push(line);
        }
    }
    flush_block(&mut current, &mut blocks);

    blocks
}

fn flush_block(lines: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if lines.is_empty() {
        return;
    }

    let indent = lines
        .iter()
        .map(|line| line.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count())
        .min()
        .unwrap_or(0);

    let block = lines
        .drain(..)
        .map(|line| &line[indent..])
        .collect::<Vec<_>>()
        .join("\n");

    let block = block.trim();
    if !block.is_empty() {
        blocks.push(block.to_string());
    }
}

/// Classify a block by the leading pattern of its lines.
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        return BlockType::Heading(level);
    }
    if is_code_fence(block) {
        return BlockType::Code;
    }

    if block.lines().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }
    if block
        .lines()
        .all(|line| line.starts_with("- ") || line.starts_with("* "))
    {
        return BlockType::UnorderedList;
    }
    if block
        .lines()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
    {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// Level of a `#`-style heading: 1 to 6 hashes followed by a space.
pub fn heading_level(line: &str) -> Option<u8> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

fn is_code_fence(block: &str) -> bool {
    block.len() >= 2 * FENCE.len() && block.starts_with(FENCE) && block.ends_with(FENCE)
}
