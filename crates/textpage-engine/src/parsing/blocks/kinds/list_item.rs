use crate::parsing::blocks::types::ListKind;

/// List item line: `- text`, `* text` or `12. text`.
pub struct ListItem;

impl ListItem {
    pub const BULLETS: [char; 2] = ['-', '*'];
    pub const ORDINAL_SUFFIX: char = '.';

    /// Parses a trimmed line as a list item, returning its kind and text.
    ///
    /// Bullets are tried before ordinals, so the unordered form wins when
    /// both could apply.
    pub fn parse(line: &str) -> Option<(ListKind, &str)> {
        Self::parse_bullet(line)
            .map(|text| (ListKind::Unordered, text))
            .or_else(|| Self::parse_ordinal(line).map(|text| (ListKind::Ordered, text)))
    }

    fn parse_bullet(line: &str) -> Option<&str> {
        let rest = line.strip_prefix(Self::BULLETS)?;
        super::after_required_space(rest)
    }

    fn parse_ordinal(line: &str) -> Option<&str> {
        let digits = line.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let rest = line[digits..].strip_prefix(Self::ORDINAL_SUFFIX)?;
        super::after_required_space(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bullets() {
        assert_eq!(ListItem::parse("- a"), Some((ListKind::Unordered, "a")));
        assert_eq!(ListItem::parse("*  b"), Some((ListKind::Unordered, "b")));
    }

    #[test]
    fn parses_ordinals() {
        assert_eq!(ListItem::parse("1. a"), Some((ListKind::Ordered, "a")));
        assert_eq!(ListItem::parse("42.\tb"), Some((ListKind::Ordered, "b")));
    }

    #[test]
    fn rejects_look_alikes() {
        assert_eq!(ListItem::parse("**bold** start"), None);
        assert_eq!(ListItem::parse("-dash"), None);
        assert_eq!(ListItem::parse("3.14 is pi"), None);
        assert_eq!(ListItem::parse("1) a"), None);
        assert_eq!(ListItem::parse("-"), None);
    }
}
