//! Inline constructs with their owned delimiter patterns.
//!
//! Each pattern matches the shortest run that does not contain its own
//! delimiter, so `*a*` never reaches across an intervening `**`.

/// Backtick code span. Raw zone: contents pass through untouched.
pub struct CodeSpan;

impl CodeSpan {
    pub const PATTERN: &'static str = r"`([^`]+)`";
    pub const TAG: &'static str = "code";
}

/// Strong emphasis, `**x**` tried before `__x__`.
pub struct Strong;

impl Strong {
    pub const PATTERNS: [&'static str; 2] = [r"\*\*([^*]+)\*\*", r"__([^_]+)__"];
    pub const TAG: &'static str = "strong";
}

/// Emphasis, `*x*` tried before `_x_`.
pub struct Emphasis;

impl Emphasis {
    pub const PATTERNS: [&'static str; 2] = [r"\*([^*]+)\*", r"_([^_]+)_"];
    pub const TAG: &'static str = "em";
}

/// Inline link `[label](url)`. Always opens in a new browsing context.
pub struct Link;

impl Link {
    pub const PATTERN: &'static str = r"\[([^\]]+)\]\(([^)]+)\)";
    pub const TARGET: &'static str = "_blank";
    pub const REL: &'static str = "noopener noreferrer";
}
