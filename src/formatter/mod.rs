//! Structured text formatter
//!
//! Turns the assistant's markdown-like reply into display blocks.
//! Line oriented: every input line yields exactly one block, classified by
//! its leading marker. The same input always produces the same blocks, so a
//! partially revealed reply can be re-formatted on every tick.

mod inline;

pub use inline::{inline_spans, InlineSpan};

use regex::Regex;
use std::sync::LazyLock;

static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").expect("valid numbered prefix regex"));

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.\s(.+)$").expect("valid numbered item regex"));

const BULLET_MARKERS: [&str; 3] = ["• ", "- ", "* "];

/// One formatted display unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`, `##` or `###` heading
    Heading { level: u8, text: String },
    BulletItem(String),
    NumberedItem { ordinal: u64, text: String },
    /// A whole line wrapped in `**`
    BoldParagraph(String),
    Paragraph(String),
    /// Blank line
    Spacer,
}

impl Block {
    /// Free text carried by the block, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::NumberedItem { text, .. }
            | Block::BulletItem(text)
            | Block::BoldParagraph(text)
            | Block::Paragraph(text) => Some(text),
            Block::Spacer => None,
        }
    }

    /// Inline bold/plain runs of the block's text
    pub fn spans(&self) -> Vec<InlineSpan> {
        self.text().map(inline_spans).unwrap_or_default()
    }
}

/// Format text into an ordered sequence of blocks
pub fn format(text: &str) -> Vec<Block> {
    text.split('\n').map(classify_line).collect()
}

/// Classify a single raw line. First match wins.
fn classify_line(line: &str) -> Block {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Block::Spacer;
    }

    if let Some(block) = heading(trimmed) {
        return block;
    }

    if let Some(rest) = BULLET_MARKERS
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
    {
        return Block::BulletItem(rest.to_string());
    }

    if NUMBERED_PREFIX.is_match(trimmed) {
        if let Some(block) = numbered_item(trimmed) {
            return block;
        }
        tracing::trace!(line = trimmed, "numbered line without usable body, kept as paragraph");
        return Block::Paragraph(trimmed.to_string());
    }

    if trimmed.starts_with("**") && trimmed.ends_with("**") && trimmed.chars().count() > 4 {
        let inner = &trimmed[2..trimmed.len() - 2];
        return Block::BoldParagraph(inner.to_string());
    }

    Block::Paragraph(trimmed.to_string())
}

fn heading(line: &str) -> Option<Block> {
    [("# ", 1), ("## ", 2), ("### ", 3)]
        .into_iter()
        .find_map(|(marker, level)| {
            line.strip_prefix(marker).map(|text| Block::Heading {
                level,
                text: text.to_string(),
            })
        })
}

fn numbered_item(line: &str) -> Option<Block> {
    let captures = NUMBERED_ITEM.captures(line)?;
    let ordinal = captures.get(1)?.as_str().parse::<u64>().ok()?;
    let text = captures.get(2)?.as_str().to_string();
    Some(Block::NumberedItem { ordinal, text })
}
