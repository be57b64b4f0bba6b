use super::{
    classify::{LineClass, LineKind},
    kinds::CodeFence,
    types::{Block, ListKind},
};

/// The block builder's state between lines.
///
/// Lists and fences accumulate across lines; everything else is emitted
/// as soon as its line is seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    Default,
    InUnorderedList(Vec<String>),
    InOrderedList(Vec<String>),
    InFencedCode { language: String, lines: Vec<String> },
}

/// Phase 2 of block parsing: folds classified lines into [`Block`]s.
///
/// Never fails. A line that matches nothing else becomes a paragraph, and
/// end of input closes whatever is still open.
pub struct BlockBuilder {
    state: ParserState,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            state: ParserState::Default,
            out: vec![],
        }
    }

    /// Current state, exposed so transitions can be checked line by line.
    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Blocks emitted so far.
    pub fn blocks(&self) -> &[Block] {
        &self.out
    }

    pub fn push(&mut self, line: &LineClass<'_>) {
        if self.in_fence() {
            self.consume_fence_line(line);
            return;
        }

        match line.kind {
            LineKind::Blank => {
                if self.in_list() {
                    self.flush_list();
                } else {
                    self.out.push(Block::Break);
                }
            }
            LineKind::Heading { level, text } => {
                self.flush_list();
                self.out.push(Block::Heading {
                    level,
                    text: text.to_string(),
                });
            }
            LineKind::ListItem { kind, text } => self.push_item(kind, text),
            LineKind::Quote { text } => {
                self.flush_list();
                self.out.push(Block::Quote {
                    text: text.to_string(),
                });
            }
            LineKind::Fence { info } => {
                self.flush_list();
                self.state = ParserState::InFencedCode {
                    language: CodeFence::language(info).to_string(),
                    lines: vec![],
                };
            }
            LineKind::Text(text) => {
                self.flush_list();
                self.out.push(Block::Paragraph {
                    text: text.to_string(),
                });
            }
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush: an unclosed fence still becomes a code block
        self.flush_list();
        self.flush_fence();
        self.out
    }

    fn in_fence(&self) -> bool {
        matches!(self.state, ParserState::InFencedCode { .. })
    }

    fn in_list(&self) -> bool {
        matches!(
            self.state,
            ParserState::InUnorderedList(_) | ParserState::InOrderedList(_)
        )
    }

    fn push_item(&mut self, kind: ListKind, text: &str) {
        match (&mut self.state, kind) {
            (ParserState::InUnorderedList(items), ListKind::Unordered)
            | (ParserState::InOrderedList(items), ListKind::Ordered) => {
                items.push(text.to_string());
                return;
            }
            _ => {}
        }

        // Switching list kinds closes the previous list.
        self.flush_list();
        let items = vec![text.to_string()];
        self.state = match kind {
            ListKind::Unordered => ParserState::InUnorderedList(items),
            ListKind::Ordered => ParserState::InOrderedList(items),
        };
    }

    fn consume_fence_line(&mut self, line: &LineClass<'_>) {
        if matches!(line.kind, LineKind::Fence { .. }) {
            self.flush_fence();
            return;
        }
        if let ParserState::InFencedCode { lines, .. } = &mut self.state {
            lines.push(line.raw.to_string());
        }
    }

    fn flush_list(&mut self) {
        let prev = std::mem::take(&mut self.state);
        let (kind, items) = match prev {
            ParserState::InUnorderedList(items) => (ListKind::Unordered, items),
            ParserState::InOrderedList(items) => (ListKind::Ordered, items),
            other => {
                self.state = other; // put back non-list state (e.g. fence)
                return;
            }
        };
        if !items.is_empty() {
            self.out.push(Block::List { kind, items });
        }
    }

    fn flush_fence(&mut self) {
        let prev = std::mem::take(&mut self.state);
        if let ParserState::InFencedCode { language, lines } = prev {
            self.out.push(Block::Code {
                language,
                body: fence_body(&lines),
            });
        } else {
            self.state = prev;
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Joins fence lines, dropping blank lines at either end and trailing
/// whitespace. Indentation inside the body is kept.
fn fence_body(lines: &[String]) -> String {
    let is_blank = |l: &&String| l.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(&l)).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !is_blank(&l))
        .map_or(start, |i| i + 1);
    lines[start..end].join("\n").trim_end().to_string()
}
