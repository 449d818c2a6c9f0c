//! Inline bold-span splitting

use regex::Regex;
use std::sync::LazyLock;

static BOLD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").expect("valid bold run regex"));

/// A run of text inside a single block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Plain(String),
    Bold(String),
}

/// Split text on non-greedy `**...**` runs.
///
/// Unclosed markers stay inside plain runs. Empty gaps between runs are
/// dropped.
pub fn inline_spans(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for run in BOLD_RUN.find_iter(text) {
        if run.start() > cursor {
            spans.push(InlineSpan::Plain(text[cursor..run.start()].to_string()));
        }
        let delimited = run.as_str();
        spans.push(InlineSpan::Bold(delimited[2..delimited.len() - 2].to_string()));
        cursor = run.end();
    }

    if cursor < text.len() {
        spans.push(InlineSpan::Plain(text[cursor..].to_string()));
    }

    spans
}
