//! Generators turn validated text into a [`ParsedContent`].
//!
//! [`LocalGenerator`] runs the line parser; [`RemoteGenerator`] asks an
//! OpenAI-compatible chat completion endpoint for the HTML instead.

mod local;
mod remote;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::ParsedContent;
use crate::validate::ConvertError;

pub use local::LocalGenerator;
pub use remote::{
    ChatChoice, ChatClient, ChatMessage, ChatRequest, ChatResponse, RemoteGenerator, RemoteSettings,
    ReqwestChatClient, strip_code_fences,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Local,
    Remote,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Local => write!(f, "local"),
            GenerationMode::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown generation mode: {0} (expected 'local' or 'remote')")]
pub struct UnknownMode(pub String);

impl FromStr for GenerationMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(GenerationMode::Local),
            "remote" => Ok(GenerationMode::Remote),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("No API key configured for the remote generator")]
    MissingApiKey,
    #[error("Remote generation failed: {0}")]
    Remote(String),
}

pub trait Generator {
    fn mode(&self) -> GenerationMode;

    fn generate(&self, text: &str) -> Result<ParsedContent, GenerateError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("local", GenerationMode::Local)]
    #[case("Remote", GenerationMode::Remote)]
    #[case(" LOCAL ", GenerationMode::Local)]
    fn parses_mode_names(#[case] input: &str, #[case] expected: GenerationMode) {
        assert_eq!(input.parse::<GenerationMode>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = "deepseek".parse::<GenerationMode>().unwrap_err();
        assert_eq!(err, UnknownMode("deepseek".into()));
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&GenerationMode::Remote).unwrap(),
            "\"remote\""
        );
        assert_eq!(GenerationMode::Local.to_string(), "local");
    }
}
