//! Adapter for serverless runtimes that deliver requests as JSON events.
//!
//! Events look like `{"httpMethod": "POST", "headers": {...}, "body": "...",
//! "isBase64Encoded": false}` and expect `{"statusCode", "headers", "body"}`
//! back, which is exactly how [`HandlerResponse`] serializes.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;
use tracing::{trace, warn};

use crate::handler::{Handler, HandlerResponse, IncomingRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CloudEvent {
    #[serde(default)]
    http_method: Option<String>,
    #[serde(default)]
    headers: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    is_base64_encoded: bool,
}

impl TryFrom<CloudEvent> for IncomingRequest {
    type Error = anyhow::Error;

    fn try_from(event: CloudEvent) -> Result<Self> {
        let body = match event.body {
            Some(body) if event.is_base64_encoded => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(body.as_bytes())
                    .context("event body is not valid base64")?;
                Some(String::from_utf8(bytes).context("event body is not UTF-8")?)
            }
            other => other,
        };
        // A missing method is answered like any other unsupported one.
        let method = event.http_method.unwrap_or_default();
        let mut request = IncomingRequest::new(method.as_str(), body);
        for (name, value) in event.headers.unwrap_or_default() {
            match value {
                Value::String(value) => request = request.with_header(&name, value),
                _ => trace!(header = %name, "Skipping non-string header"),
            }
        }
        Ok(request)
    }
}

/// Parse a raw event into a request.
pub fn request_from_event(event: Value) -> Result<IncomingRequest> {
    let event: CloudEvent = serde_json::from_value(event).context("malformed event")?;
    IncomingRequest::try_from(event)
}

/// Run one event through the handler and return the runtime reply.
pub async fn handle_event(handler: &Handler, event: Value) -> Value {
    let response = match request_from_event(event) {
        Ok(request) => handler.handle(request).await,
        Err(err) => {
            warn!(error = %err, "Rejected event");
            HandlerResponse::json(400, &serde_json::json!({ "error": "Invalid event" }))
        }
    };
    serde_json::to_value(&response).unwrap_or_else(|err| {
        warn!(error = %err, "Failed to encode event reply");
        serde_json::json!({ "statusCode": 500, "headers": {}, "body": "" })
    })
}
