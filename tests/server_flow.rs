use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tasksolver::ai::config::AiConfig;
use tasksolver::server::{router, DEFAULT_MAX_BODY_BYTES};
use tasksolver::Handler;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn post_photo_returns_solution() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "content":
                "{\"subject\":\"Математика\",\"task\":\"2+2\",\"steps\":[\"Шаг 1: 2+2=4\"],\"answer\":\"4\"}"
            } } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = AiConfig {
        openai_chat_url: Some(format!("{}/v1/chat/completions", server.uri())),
        ..AiConfig::new("k")
    };
    let app = router(Arc::new(Handler::new(Some(config))), DEFAULT_MAX_BODY_BYTES);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "image": "data:image/jpeg;base64,QUJD" }))
                        .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(response.headers()["content-type"], "application/json");
    assert!(response.headers().contains_key("x-request-id"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("Математика"));
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(payload["answer"], "4");
    assert_eq!(payload["steps"], json!(["Шаг 1: 2+2=4"]));
    server.verify().await;
}

#[tokio::test]
async fn post_without_body_is_bad_request() {
    let app = router(
        Arc::new(Handler::new(Some(AiConfig::new("k")))),
        DEFAULT_MAX_BODY_BYTES,
    );
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], br#"{"error":"No image provided"}"#);
}

#[tokio::test]
async fn request_ids_are_unique() {
    let app = router(Arc::new(Handler::new(None)), DEFAULT_MAX_BODY_BYTES);
    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        ids.push(response.headers()["x-request-id"].clone());
    }
    assert_ne!(ids[0], ids[1]);
}
