/// Triple-backtick fence delimiter.
pub struct CodeFence;

impl CodeFence {
    pub const DELIMITER: &'static str = "```";
    pub const DEFAULT_LANGUAGE: &'static str = "text";

    /// Returns the info string after the backticks if the trimmed line is a
    /// fence delimiter. The info string may be empty.
    pub fn info(line: &str) -> Option<&str> {
        line.trim()
            .strip_prefix(Self::DELIMITER)
            .map(str::trim)
    }

    /// Language tag for an opening fence, falling back to `text`.
    pub fn language(info: &str) -> &str {
        let lang = info.split_whitespace().next().unwrap_or_default();
        if lang.is_empty() {
            Self::DEFAULT_LANGUAGE
        } else {
            lang
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_fence() {
        assert_eq!(CodeFence::info("```rust"), Some("rust"));
        assert_eq!(CodeFence::info("  ```  "), Some(""));
        assert_eq!(CodeFence::info("``not a fence"), None);
        assert_eq!(CodeFence::info("text ```"), None);
    }

    #[test]
    fn language_defaults_to_text() {
        assert_eq!(CodeFence::language(""), "text");
        assert_eq!(CodeFence::language("python"), "python");
        assert_eq!(CodeFence::language("js title=app.js"), "js");
    }
}
