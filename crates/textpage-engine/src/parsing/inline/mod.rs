//! # Inline Transform
//!
//! Rewrites one line of paragraph text into HTML. Runs only on lines the
//! block classifier left as plain paragraphs; headings, list items, quotes
//! and fenced code are escaped but never inline-transformed.
//!
//! ## Pipeline
//!
//! 1. HTML-escape the whole line (`parsing::escape`).
//! 2. Split out code spans. Code spans are raw zones: their contents are
//!    emitted verbatim and no later rule looks inside them.
//! 3. On the remaining text, apply in order: bold (`**`, `__`), italic
//!    (`*`, `_`), links (`[label](url)`).
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter patterns and tag names, one type per construct
//! - **`transform`**: `transform_inline()` main entry point
//!
//! Unbalanced delimiters never error; they stay in the output as literal text.

pub mod kinds;
pub mod transform;

pub use transform::transform_inline;
