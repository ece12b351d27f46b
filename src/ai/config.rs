use std::env;
use std::time::Duration;

/// Default upstream timeout for a single completion request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct AiConfig {
    pub api_key: String,
    pub vision_model: String,
    pub openai_chat_url: Option<String>,
    pub timeout: Duration,
}

impl AiConfig {
    /// Build the config from the process environment.
    ///
    /// Returns `None` when `OPENAI_API_KEY` is unset or empty; the handler
    /// reports that as a configuration error on each request.
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("OPENAI_API_KEY") {
            Ok(k) if !k.trim().is_empty() => k,
            _ => return None,
        };
        let timeout_secs = env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self {
            api_key,
            vision_model: env::var("OPENAI_VISION_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_chat_url: env::var("OPENAI_CHAT_URL").ok(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Config with default model and timeout for the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            vision_model: "gpt-4o".to_string(),
            openai_chat_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
