/// ATX heading: a run of `#` characters, whitespace, then text.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: u8 = 6;

    /// Parses a trimmed line as a heading, returning `(level, text)`.
    ///
    /// Runs longer than six markers are clamped to level 6 rather than
    /// rejected, so `####### deep` is still a heading.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        let run = line.chars().take_while(|&c| c == Self::MARKER).count();
        if run == 0 {
            return None;
        }
        let text = super::after_required_space(&line[run..])?;
        let level = u8::try_from(run).unwrap_or(u8::MAX).min(Self::MAX_LEVEL);
        Some((level, text))
    }
}
