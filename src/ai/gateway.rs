use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::config::GatewayConfig;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// One chat-completion call: a system prompt, the user's text, and the
/// sampling parameters the caller wants. The model is gateway config.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Stateless chat-completion collaborator. Handlers depend on this
/// trait; tests substitute scripted doubles.
pub trait ChatGateway {
    fn complete(&self, req: CompletionRequest<'_>) -> Result<String, GatewayError>;
}

#[derive(Debug)]
pub enum GatewayError {
    /// Request never completed (connect failure or deadline exceeded).
    Network(String),
    /// Non-2xx reply from the API.
    Api(String),
    /// 2xx reply whose body could not be decoded.
    Decode(String),
    /// Well-formed reply with no generated text.
    EmptyReply,
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Network(msg) => write!(f, "gateway request failed: {msg}"),
            GatewayError::Api(msg) => write!(f, "gateway API error: {msg}"),
            GatewayError::Decode(msg) => write!(f, "gateway reply decode failed: {msg}"),
            GatewayError::EmptyReply => write!(f, "gateway returned no text"),
        }
    }
}

impl std::error::Error for GatewayError {}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn extract_reply(completion: ChatCompletion) -> Result<String, GatewayError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(GatewayError::EmptyReply)
}

/// Blocking client for an OpenAI-compatible chat-completions endpoint.
/// Every call carries the configured total deadline; a timeout surfaces
/// as [`GatewayError::Network`].
pub struct OpenAiGateway {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiGateway {
    pub fn new(cfg: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Network(format!("build http client failed: {e}")))?;

        Ok(Self {
            client,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            url: format!("{}{COMPLETIONS_PATH}", cfg.base_url.trim_end_matches('/')),
        })
    }

    fn payload(&self, req: &CompletionRequest<'_>) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": req.system },
                { "role": "user", "content": req.user },
            ],
            "temperature": req.temperature,
            "max_tokens": req.max_tokens,
        })
    }
}

impl ChatGateway for OpenAiGateway {
    fn complete(&self, req: CompletionRequest<'_>) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.payload(&req))
            .send()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_else(|_| "(no body)".to_string());
            warn!("chat-completion API returned {status}: {body}");
            return Err(GatewayError::Api(format!("{status} - {body}")));
        }

        let completion: ChatCompletion = response
            .json()
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        extract_reply(completion)
    }
}
