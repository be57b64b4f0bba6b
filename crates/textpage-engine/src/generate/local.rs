use chrono::{DateTime, Local};

use super::{GenerateError, GenerationMode, Generator};
use crate::content::{ParsedContent, convert, convert_at};

/// Runs the built-in line parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalGenerator {
    /// Pinned clock for the title fallback; `None` reads the wall clock.
    now: Option<DateTime<Local>>,
}

impl LocalGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(now: DateTime<Local>) -> Self {
        Self { now: Some(now) }
    }
}

impl Generator for LocalGenerator {
    fn mode(&self) -> GenerationMode {
        GenerationMode::Local
    }

    fn generate(&self, text: &str) -> Result<ParsedContent, GenerateError> {
        let parsed = match self.now {
            Some(now) => convert_at(text, now)?,
            None => convert(text)?,
        };
        Ok(parsed)
    }
}
