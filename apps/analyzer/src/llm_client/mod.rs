//! Anthropic Messages client for the LLM-backed skill extractor. The default
//! pipeline never touches the network.
//!
//! The client exposes one typed call, [`LlmClient::call_entities`], on top of
//! a generic JSON completion with retry on 429 and 5xx.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::skills::extractor::EntitySpan;

pub mod prompts;

use prompts::{entity_extraction_prompt, ENTITY_EXTRACTION_SYSTEM, ENTITY_LABELS};

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("entity model returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("entity model reply is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("entity model reply has no text")]
    EmptyContent,

    #[error("entity model used unknown label '{0}'")]
    UnknownLabel(String),
}

impl LlmError {
    fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(e) => e.is_timeout() || e.is_connect(),
            LlmError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            _ => false,
        }
    }
}

/// How many times a request is attempted and how long to wait in between.
/// The wait doubles after each failed attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Wait before attempt `attempt` (0-based); none before the first.
    fn delay_before(&self, attempt: u32) -> Option<Duration> {
        (attempt > 0).then(|| self.base_delay * 2u32.saturating_pow(attempt - 1))
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesReply {
    content: Vec<ReplyBlock>,
}

#[derive(Deserialize)]
struct ReplyBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorReply {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
    api_url: String,
    retry: RetryPolicy,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            http: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// Points the client at a different endpoint (proxies, local mocks).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Labeled entity spans for `text`, in order of appearance.
    ///
    /// Labels outside [`ENTITY_LABELS`] fail the call. Spans that do not occur
    /// verbatim in `text` are dropped.
    pub async fn call_entities(&self, text: &str) -> Result<Vec<EntitySpan>, LlmError> {
        let spans: Vec<EntitySpan> = self
            .call_json(&entity_extraction_prompt(text), ENTITY_EXTRACTION_SYSTEM)
            .await?;

        if let Some(bad) = spans
            .iter()
            .find(|span| !ENTITY_LABELS.contains(&span.label.as_str()))
        {
            return Err(LlmError::UnknownLabel(bad.label.clone()));
        }

        let total = spans.len();
        let kept: Vec<EntitySpan> = spans
            .into_iter()
            .filter(|span| !span.text.trim().is_empty() && text.contains(span.text.as_str()))
            .collect();
        if kept.len() < total {
            warn!(dropped = total - kept.len(), "entity spans not found in input");
        }
        Ok(kept)
    }

    /// Sends one user message and deserializes the reply text as JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let reply = self.complete(prompt, system).await?;
        Ok(serde_json::from_str(strip_json_fences(&reply))?)
    }

    /// Reply text of the first text block, retrying per the client's policy.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut attempt = 0;
        loop {
            if let Some(delay) = self.retry.delay_before(attempt) {
                tokio::time::sleep(delay).await;
            }
            match self.send(&body).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt + 1 < self.retry.attempts => {
                    warn!(attempt, error = %e, "entity model call failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send(&self, body: &MessagesRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorReply>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: MessagesReply = response.json().await?;
        debug!(blocks = reply.content.len(), "entity model replied");
        reply
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` fences around a JSON reply.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}
