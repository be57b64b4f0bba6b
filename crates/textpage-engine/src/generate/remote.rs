use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{GenerateError, GenerationMode, Generator};
use crate::content::ParsedContent;
use crate::validate::ConvertError;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const MODELS_PATH: &str = "/v1/models";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 4000;

const SYSTEM_PROMPT: &str = "You are an HTML generation assistant. Turn the text the user \
provides into a polished HTML page: modern minimal design, an orange palette (#f97316, \
#ea580c, #fb923c), soft shadows and gradient backgrounds, generous spacing, responsive \
layout, inline CSS only, and proper headings, paragraphs and lists. Reply with the HTML \
and nothing else.";

/// Where and how to reach the chat completion endpoint.
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// Transport for chat completion requests.
pub trait ChatClient {
    fn post_chat(&self, url: &str, api_key: &str, request: &ChatRequest) -> Result<ChatResponse>;

    /// Lists the models visible to `api_key`; any non-success status is an error.
    fn get_models(&self, url: &str, api_key: &str) -> Result<()>;
}

pub struct ReqwestChatClient {
    client: reqwest::blocking::Client,
}

impl ReqwestChatClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl ChatClient for ReqwestChatClient {
    fn post_chat(&self, url: &str, api_key: &str, request: &ChatRequest) -> Result<ChatResponse> {
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .context("Failed to send chat request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            anyhow::bail!("Chat request failed with status {status}: {body}");
        }

        response.json().context("Failed to parse chat response")
    }

    fn get_models(&self, url: &str, api_key: &str) -> Result<()> {
        let response = self
            .client
            .get(url)
            .bearer_auth(api_key)
            .send()
            .context("Failed to send models request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            anyhow::bail!("Models request failed with status {status}: {body}");
        }
        Ok(())
    }
}

/// Delegates HTML generation to a remote model.
///
/// One request per call. Failures are reported as they come back; there is
/// no retry and no fallback to the local parser.
pub struct RemoteGenerator<C: ChatClient = ReqwestChatClient> {
    settings: RemoteSettings,
    client: C,
}

impl RemoteGenerator<ReqwestChatClient> {
    pub fn new(settings: RemoteSettings) -> Result<Self> {
        let client = ReqwestChatClient::new(settings.timeout)?;
        Ok(Self { settings, client })
    }
}

impl<C: ChatClient> RemoteGenerator<C> {
    pub fn with_client(settings: RemoteSettings, client: C) -> Self {
        Self { settings, client }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.settings.base_url.trim_end_matches('/'))
    }

    fn api_key(&self) -> Result<&str, GenerateError> {
        self.settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenerateError::MissingApiKey)
    }

    /// Checks the configured key against the models endpoint without
    /// spending a completion.
    pub fn check_api_key(&self) -> Result<(), GenerateError> {
        let api_key = self.api_key()?;
        let url = self.endpoint(MODELS_PATH);
        log::info!("Checking API key against {url}");

        self.client.get_models(&url, api_key).map_err(|err| {
            log::warn!("API key check failed: {err:#}");
            GenerateError::Remote(format!("{err:#}"))
        })
    }

    fn request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::new("system", SYSTEM_PROMPT),
                ChatMessage::new(
                    "user",
                    format!("Convert the following text into polished HTML:\n\n{text}"),
                ),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        }
    }
}

impl<C: ChatClient> Generator for RemoteGenerator<C> {
    fn mode(&self) -> GenerationMode {
        GenerationMode::Remote
    }

    fn generate(&self, text: &str) -> Result<ParsedContent, GenerateError> {
        if text.trim().is_empty() {
            return Err(ConvertError::EmptyInput.into());
        }
        let api_key = self.api_key()?;

        let url = self.endpoint(COMPLETIONS_PATH);
        log::debug!("Requesting generation from {url} with model {}", self.settings.model);

        let response = self
            .client
            .post_chat(&url, api_key, &self.request(text))
            .map_err(|err| {
                log::warn!("Remote generation failed: {err:#}");
                GenerateError::Remote(format!("{err:#}"))
            })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerateError::Remote("Response contained no choices".to_string()))?;

        Ok(ParsedContent::from_generated(
            text,
            strip_code_fences(&content),
        ))
    }
}

/// Removes markdown code fence markers a model wraps around its HTML,
/// along with any whitespace that follows each marker.
pub fn strip_code_fences(content: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| Regex::new(r"```(?:html)?\s*").expect("Invalid fence regex"));
    fence.replace_all(content, "").trim().to_string()
}
