use super::kinds::{BlockQuote, CodeFence, Heading, ListItem};
use super::types::ListKind;

/// What a single trimmed line looks like, without reference to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    ListItem { kind: ListKind, text: &'a str },
    Quote { text: &'a str },
    /// A fence delimiter; `info` is whatever follows the backticks.
    Fence { info: &'a str },
    Text(&'a str),
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently.
/// The builder decides what the class means given its current state (for
/// example, every line inside a fence is body text whatever its class).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass<'a> {
    /// The physical line as it appeared, minus the line terminator.
    pub raw: &'a str,
    pub kind: LineKind<'a>,
}

/// Classifies individual lines for the block parsing phase.
pub struct LineClassifier;

impl LineClassifier {
    /// Classifies a line by trying each block opener in priority order:
    /// blank, heading, list item, quote, fence, and finally plain text.
    pub fn classify<'a>(&self, raw: &'a str) -> LineClass<'a> {
        let trimmed = raw.trim();

        let kind = if trimmed.is_empty() {
            LineKind::Blank
        } else if let Some((level, text)) = Heading::parse(trimmed) {
            LineKind::Heading { level, text }
        } else if let Some((kind, text)) = ListItem::parse(trimmed) {
            LineKind::ListItem { kind, text }
        } else if let Some(text) = BlockQuote::parse(trimmed) {
            LineKind::Quote { text }
        } else if let Some(info) = CodeFence::info(trimmed) {
            LineKind::Fence { info }
        } else {
            LineKind::Text(trimmed)
        };

        LineClass { raw, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kind(line: &str) -> LineKind<'_> {
        LineClassifier.classify(line).kind
    }

    #[rstest]
    #[case("", LineKind::Blank)]
    #[case(" \t ", LineKind::Blank)]
    #[case("## Title", LineKind::Heading { level: 2, text: "Title" })]
    #[case("  # indented", LineKind::Heading { level: 1, text: "indented" })]
    #[case("- item", LineKind::ListItem { kind: ListKind::Unordered, text: "item" })]
    #[case("3. third", LineKind::ListItem { kind: ListKind::Ordered, text: "third" })]
    #[case("> said", LineKind::Quote { text: "said" })]
    #[case("```js", LineKind::Fence { info: "js" })]
    #[case("```", LineKind::Fence { info: "" })]
    #[case("just words ", LineKind::Text("just words"))]
    #[case("#tag", LineKind::Text("#tag"))]
    #[case(">no space", LineKind::Text(">no space"))]
    fn classifies_lines(#[case] line: &str, #[case] expected: LineKind<'_>) {
        assert_eq!(kind(line), expected);
    }

    #[test]
    fn keeps_raw_line() {
        let class = LineClassifier.classify("    indented code");
        assert_eq!(class.raw, "    indented code");
        assert_eq!(class.kind, LineKind::Text("indented code"));
    }

    #[test]
    fn heading_beats_list_and_quote() {
        assert!(matches!(kind("# - x"), LineKind::Heading { .. }));
        assert!(matches!(kind("- > x"), LineKind::ListItem { .. }));
    }
}
