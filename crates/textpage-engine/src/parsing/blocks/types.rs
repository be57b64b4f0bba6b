/// Which list element an accumulated run of items becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `-` or `*` bullets, rendered as `<ul>`.
    Unordered,
    /// `1.` style ordinals, rendered as `<ol>`.
    Ordered,
}

/// One structural unit of the input, in input order.
///
/// Text is kept raw here; escaping and inline markup happen at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX heading, level already clamped to 1..=6.
    Heading { level: u8, text: String },
    /// A run of consecutive items of one kind.
    List { kind: ListKind, items: Vec<String> },
    /// A single `>` line.
    Quote { text: String },
    /// Fenced code with its language tag and verbatim body.
    Code { language: String, body: String },
    /// Any other non-blank line.
    Paragraph { text: String },
    /// Placeholder for a blank line outside a list.
    Break,
}
