use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::ai::common::UpstreamError;
use crate::ai::config::AiConfig;
use crate::ai::vision::solve_photo;
use crate::solution::Solution;
use crate::text_utils::strip_data_url_prefix;

/// HTTP method of an incoming request, reduced to what the handler cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Options,
    Post,
    Other(String),
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value {
            "OPTIONS" => Method::Options,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: Method,
    /// Header names are stored lower-cased.
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl IncomingRequest {
    pub fn new(method: impl Into<Method>, body: Option<String>) -> Self {
        Self {
            method: method.into(),
            headers: BTreeMap::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    /// Empty 200 answer to a CORS preflight request.
    pub fn preflight() -> Self {
        let headers = [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
            ("Access-Control-Max-Age", "86400"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            status: 200,
            headers,
            body: String::new(),
        }
    }

    /// JSON answer with the CORS origin header.
    ///
    /// `serde_json` writes non-ASCII characters as-is, so Cyrillic text
    /// reaches the client unescaped.
    pub fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, "Failed to serialize response body");
                return Self::json(500, &ErrorBody::new("Internal error", None));
            }
        };
        let headers = [
            ("Access-Control-Allow-Origin", "*"),
            ("Content-Type", "application/json"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            status,
            headers,
            body,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}

/// Everything that can stop a request from producing a [`Solution`].
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid JSON body")]
    InvalidBody(#[source] serde_json::Error),
    #[error("No image provided")]
    MissingImage,
    #[error("API key not configured")]
    MissingApiKey,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl SolveError {
    pub fn status(&self) -> u16 {
        match self {
            SolveError::MethodNotAllowed => 405,
            SolveError::InvalidBody(_) | SolveError::MissingImage => 400,
            SolveError::MissingApiKey => 500,
            SolveError::Upstream(UpstreamError::Timeout) => 504,
            SolveError::Upstream(_) => 502,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            SolveError::Upstream(UpstreamError::Status { body, .. }) => Some(body.clone()),
            SolveError::Upstream(UpstreamError::Transport(err)) => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn into_response(self) -> HandlerResponse {
        HandlerResponse::json(
            self.status(),
            &ErrorBody::new(self.to_string(), self.details()),
        )
    }
}

/// Stateless request handler; cheap to clone and share between tasks.
#[derive(Clone)]
pub struct Handler {
    ai: Option<AiConfig>,
    client: reqwest::Client,
}

impl Handler {
    /// `ai` is `None` when no API key is configured.
    pub fn new(ai: Option<AiConfig>) -> Self {
        Self::with_client(ai, reqwest::Client::new())
    }

    pub fn with_client(ai: Option<AiConfig>, client: reqwest::Client) -> Self {
        Self { ai, client }
    }

    #[instrument(level = "debug", skip_all, fields(method = ?request.method))]
    pub async fn handle(&self, request: IncomingRequest) -> HandlerResponse {
        if request.method == Method::Options {
            debug!(origin = ?request.header("origin"), "Answering preflight");
            return HandlerResponse::preflight();
        }

        match self.solve(&request).await {
            Ok(solution) => {
                debug!(
                    subject = %solution.subject,
                    steps = solution.steps.len(),
                    "Solved task"
                );
                HandlerResponse::json(200, &solution)
            }
            Err(err) => {
                let status = err.status();
                if status >= 500 {
                    error!(status, error = %err, "Request failed");
                } else {
                    warn!(status, error = %err, "Rejected request");
                }
                err.into_response()
            }
        }
    }

    async fn solve(&self, request: &IncomingRequest) -> Result<Solution, SolveError> {
        if request.method != Method::Post {
            return Err(SolveError::MethodNotAllowed);
        }

        let image = extract_image(request.body.as_deref())?;
        let payload = strip_data_url_prefix(&image);

        let ai = self.ai.as_ref().ok_or(SolveError::MissingApiKey)?;
        let content = solve_photo(&self.client, ai, payload).await?;

        Ok(Solution::from_reply(&content))
    }
}

/// Pull the `image` string out of a JSON request body.
///
/// An absent or blank body counts as `{}`.
fn extract_image(body: Option<&str>) -> Result<String, SolveError> {
    let raw = match body.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => "{}",
    };
    let value: Value = serde_json::from_str(raw).map_err(SolveError::InvalidBody)?;
    match value.get("image").and_then(Value::as_str) {
        Some(image) if !image.is_empty() => Ok(image.to_string()),
        _ => Err(SolveError::MissingImage),
    }
}
