use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method as HttpMethod, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::handler::{Handler, HandlerResponse, IncomingRequest};

/// Default cap on request bodies; base64 photos are well above axum's 2 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Router serving the solver on `/` for every method.
pub fn router(handler: Arc<Handler>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", any(dispatch))
        .with_state(handler)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(assign_request_id))
}

async fn dispatch(
    State(handler): State<Arc<Handler>>,
    method: HttpMethod,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejection_response(rejection),
    };
    let body = if body.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&body).into_owned())
    };
    let mut request = IncomingRequest::new(method.as_str(), body);
    for (name, value) in &headers {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }
    handler.handle(request).await.into_response()
}

/// JSON error for a body that could not be read, with the usual CORS headers.
fn body_rejection_response(rejection: BytesRejection) -> Response {
    let status = rejection.status();
    tracing::warn!(%status, error = %rejection.body_text(), "Rejected request body");
    let (status, error) = if status == StatusCode::PAYLOAD_TOO_LARGE {
        (status, "Payload too large")
    } else {
        (StatusCode::BAD_REQUEST, "Invalid request body")
    };
    HandlerResponse::json(status.as_u16(), &serde_json::json!({ "error": error })).into_response()
}

async fn assign_request_id(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let mut response = next.run(req).await;
    let status = response.status();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }
    tracing::debug!(
        request_id,
        method = %method,
        uri = %uri,
        status = %status,
        "Request completed"
    );
    response
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Skipping invalid response header"),
            }
        }
        response
    }
}
