//! # Block Parsing
//!
//! Two-phase, line-oriented block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each trimmed line is classified
//!    into a `LineKind` (blank, heading, list item, quote, fence, text) using
//!    only local facts.
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` holds the
//!    `ParserState` (`Default`, `InUnorderedList`, `InOrderedList`,
//!    `InFencedCode`) and emits `Block`s as lists and fences close.
//!
//! ## Modules
//!
//! - **`types`**: `Block` and `ListKind`
//! - **`kinds`**: block types with owned delimiters (Heading, ListItem, BlockQuote, CodeFence)
//! - **`classify`**: `LineClassifier` produces a `LineClass` for each line
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key Invariants
//!
//! - No nesting: lists and quotes never contain other blocks
//! - Fenced code is a raw zone: no block or inline parsing inside
//! - A blank line always ends an open list
//! - Every line lands in exactly one block; malformed input degrades to paragraphs

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod types;

pub use builder::{BlockBuilder, ParserState};
pub use classify::{LineClass, LineClassifier, LineKind};
pub use types::{Block, ListKind};
