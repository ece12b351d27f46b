use crate::ai::common::{
    build_chat_body, parse_chat_content, send_openai_request, UpstreamError, OPENAI_CHAT_URL,
};
use crate::ai::config::AiConfig;
use crate::ai::prompts::{SOLVER_SYSTEM_PROMPT, SOLVER_USER_PROMPT};
use serde_json::Value;
use tracing::{debug, instrument, trace};

pub const SOLVE_MAX_TOKENS: u32 = 2000;
pub const SOLVE_TEMPERATURE: f64 = 0.2;

/// Build the chat body asking the model to solve the task on the photo.
///
/// `image_base64` must already be a bare base64 payload; the data URL is
/// always labelled as JPEG.
pub fn build_solve_request(model: &str, image_base64: &str) -> Value {
    let data_url = format!("data:image/jpeg;base64,{image_base64}");
    let parts = vec![
        serde_json::json!({ "type": "text", "text": SOLVER_USER_PROMPT }),
        serde_json::json!({ "type": "image_url", "image_url": { "url": data_url } }),
    ];
    build_chat_body(
        model,
        SOLVER_SYSTEM_PROMPT,
        parts,
        SOLVE_MAX_TOKENS,
        SOLVE_TEMPERATURE,
    )
}

/// Send the photo to the vision model and return the trimmed reply text.
#[instrument(level = "trace", skip(client, config, image_base64), fields(model = %config.vision_model))]
pub async fn solve_photo(
    client: &reqwest::Client,
    config: &AiConfig,
    image_base64: &str,
) -> Result<String, UpstreamError> {
    let url = config.openai_chat_url.as_deref().unwrap_or(OPENAI_CHAT_URL);
    let body = build_solve_request(&config.vision_model, image_base64);

    debug!(url, payload_len = image_base64.len(), "sending vision request");

    let builder = client.post(url).timeout(config.timeout).json(&body);
    let resp = send_openai_request(&config.api_key, builder).await?;

    let raw = resp.text().await?;
    let snippet: String = raw.chars().take(200).collect();
    debug!(snippet = %snippet, "vision response body");
    trace!(raw = %raw, "vision response");
    parse_chat_content(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_request_embeds_jpeg_data_url() {
        let body = build_solve_request("gpt-4o", "QUJD");
        let parts = &body["messages"][1]["content"];
        assert_eq!(parts[0]["text"], SOLVER_USER_PROMPT);
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/jpeg;base64,QUJD");
        assert_eq!(body["messages"][0]["content"], SOLVER_SYSTEM_PROMPT);
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["temperature"], 0.2);
    }
}
