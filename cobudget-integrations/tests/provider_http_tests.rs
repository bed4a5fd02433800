/// HTTP client tests against local stand-in servers
///
/// Each test binds an axum server on an ephemeral port and points a provider
/// at it, so the real request/response path is exercised offline.

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use cobudget_integrations::providers::{
    ImageLookup, ImageSearchClient, ImageSearchConfig, MistralClient, MistralConfig, ProviderError,
    RecipeProvider,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serves `app` on 127.0.0.1 and returns its base URL
async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn mistral_config(base: &str) -> MistralConfig {
    let mut config = MistralConfig::new("test-key");
    config.api_url = format!("{}/v1/chat/completions", base);
    config
}

async fn chat_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"})));
    }

    let user_message = body["messages"][1]["content"].as_str().unwrap_or_default().to_string();
    (
        StatusCode::OK,
        Json(json!({
            "id": "cmpl-test",
            "model": body["model"],
            "choices": [{"index": 0, "message": {"role": "assistant", "content": user_message}}]
        })),
    )
}

#[tokio::test]
async fn test_mistral_returns_first_choice() {
    let base = serve(Router::new().route("/v1/chat/completions", post(chat_completion))).await;
    let client = MistralClient::new(mistral_config(&base)).unwrap();

    let text = client.recipes("paneer").await.unwrap();
    assert_eq!(text, "Give me some easy recipes using items related to: paneer");
}

#[tokio::test]
async fn test_mistral_upstream_error_status() {
    let base = serve(Router::new().route("/v1/chat/completions", post(chat_completion))).await;
    let mut config = mistral_config(&base);
    config.api_key = "wrong-key".to_string();
    let client = MistralClient::new(config).unwrap();

    let err = client.recipes("paneer").await.unwrap_err();
    match err {
        ProviderError::UpstreamStatus { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Unauthorized"));
        }
        other => panic!("expected upstream status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_mistral_empty_choices() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base = serve(app).await;
    let client = MistralClient::new(mistral_config(&base)).unwrap();

    let err = client.recipes("paneer").await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

const RESULT_IMAGE: &str = "https://i5.walmartimages.com/asr/5a1e2c3d-4b5f-6a7b-8c9d-0e1f2a3b4c5d.jpeg";

fn image_config(base: &str) -> ImageSearchConfig {
    ImageSearchConfig {
        search_url: format!("{}/search", base),
        store_search_url: format!("{}/store/search", base),
        search_timeout: Duration::from_secs(2),
        store_search_timeout: Duration::from_secs(2),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_image_found_in_search_results() {
    let app = Router::new().route(
        "/search",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            assert_eq!(params.get("q").map(String::as_str), Some("amul milk walmart"));
            assert_eq!(params.get("tbm").map(String::as_str), Some("isch"));
            format!(r#"<html><img src="{}"></html>"#, RESULT_IMAGE)
        }),
    );
    let base = serve(app).await;
    let client = ImageSearchClient::new(image_config(&base)).unwrap();

    let found = client.find_image("amul milk").await.unwrap();
    assert_eq!(found.as_deref(), Some(RESULT_IMAGE));
}

#[tokio::test]
async fn test_image_falls_back_to_store_search() {
    let app = Router::new()
        .route("/search", get(|| async { "<html>nothing here</html>" }))
        .route(
            "/store/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                // Only the first word is searched
                assert_eq!(params.get("q").map(String::as_str), Some("amul"));
                r#"{"items":[{"thumbnail": "https://i5.walmartimages.com/seo\/amul.jpg"}]}"#
            }),
        );
    let base = serve(app).await;
    let client = ImageSearchClient::new(image_config(&base)).unwrap();

    let found = client.find_image("amul milk").await.unwrap();
    assert_eq!(found.as_deref(), Some("https://i5.walmartimages.com/seo/amul.jpg"));
}

#[tokio::test]
async fn test_image_nothing_found() {
    let app = Router::new()
        .route("/search", get(|| async { "<html></html>" }))
        .route("/store/search", get(|| async { "{}" }));
    let base = serve(app).await;
    let client = ImageSearchClient::new(image_config(&base)).unwrap();

    assert_eq!(client.find_image("amul milk").await.unwrap(), None);
}

#[tokio::test]
async fn test_image_unreachable_upstream_is_error() {
    // Nothing listens on the port once the listener is dropped
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = ImageSearchClient::new(image_config(&base)).unwrap();
    let err = client.find_image("amul milk").await.unwrap_err();
    assert!(matches!(err, ProviderError::Http(_)));
}
