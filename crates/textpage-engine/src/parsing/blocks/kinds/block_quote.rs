/// Blockquote line: `>` then whitespace then text.
///
/// Each quote line stands alone; consecutive `>` lines are not merged.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: char = '>';

    pub fn parse(line: &str) -> Option<&str> {
        let rest = line.strip_prefix(Self::PREFIX)?;
        super::after_required_space(rest)
    }
}
