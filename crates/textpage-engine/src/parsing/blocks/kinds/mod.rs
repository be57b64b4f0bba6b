//! # Block Kinds
//!
//! Block-level constructs that own their syntax. The classifier asks these
//! types whether a trimmed line opens them; it never hardcodes `#`, `-`,
//! `>` or backticks itself.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list_item;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use heading::Heading;
pub use list_item::ListItem;

/// Returns the text after a marker when the marker is followed by at least
/// one whitespace character and then something non-blank.
pub(crate) fn after_required_space(s: &str) -> Option<&str> {
    if !s.starts_with(char::is_whitespace) {
        return None;
    }
    let text = s.trim_start();
    (!text.is_empty()).then_some(text)
}
