use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Failures of a single chat-completion call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The API answered with a non-success status.
    #[error("OpenAI error: {status}")]
    Status { status: u16, body: String },
    #[error("OpenAI timeout")]
    Timeout,
    #[error("OpenAI request failed")]
    Transport(#[source] reqwest::Error),
    #[error("Invalid OpenAI response")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// Build a chat body with a system turn and a user turn made of content parts.
pub fn build_chat_body(
    model: &str,
    system: &str,
    user_parts: Vec<Value>,
    max_tokens: u32,
    temperature: f64,
) -> Value {
    serde_json::json!({
        "model": model,
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": user_parts },
        ],
        "max_tokens": max_tokens,
        "temperature": temperature,
    })
}

/// Send a prepared request with bearer auth and reject non-success statuses.
#[instrument(level = "trace", skip(api_key, builder))]
pub async fn send_openai_request(
    api_key: &str,
    builder: reqwest::RequestBuilder,
) -> Result<reqwest::Response, UpstreamError> {
    let resp = builder.bearer_auth(api_key).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        warn!(%status, "OpenAI API error");
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(resp)
}

/// Extract the trimmed text of the first choice from a raw chat response.
pub fn parse_chat_content(raw: &str) -> Result<String, UpstreamError> {
    let chat: ChatResponse = serde_json::from_str(raw).map_err(|err| {
        debug!(error = %err, "chat response is not a completion object");
        UpstreamError::InvalidResponse(err.to_string())
    })?;
    let content = chat
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::InvalidResponse("missing chat choice".to_string()))?
        .message
        .content
        .ok_or_else(|| UpstreamError::InvalidResponse("missing message content".to_string()))?;
    trace!(content = %content, "chat content");
    Ok(content.trim().to_string())
}
