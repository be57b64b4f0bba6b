//! # Parsing
//!
//! Line-oriented text-to-HTML conversion: classify lines, build blocks,
//! render them. Single pass, no recursion, no backtracking.

pub mod blocks;
pub mod escape;
pub mod inline;
pub mod render;

use blocks::{Block, BlockBuilder, LineClassifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub blocks: Vec<Block>,
}

/// Splits `text` into physical lines (`\n` or `\r\n`) and folds them into blocks.
pub fn parse_document(text: &str) -> ParsedDoc {
    let classifier = LineClassifier;
    let mut builder = BlockBuilder::new();

    for line in text.lines() {
        let lc = classifier.classify(line);
        builder.push(&lc);
    }

    ParsedDoc {
        blocks: builder.finish(),
    }
}

/// Convenience: parse and render in one step.
pub fn render_html(text: &str) -> String {
    render::render_blocks(&parse_document(text).blocks)
}
