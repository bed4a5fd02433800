/// HTTP tests that need no database
///
/// The router runs over the in-memory catalog and mock providers. Routes
/// that touch PostgreSQL are covered in `integration_test.rs`.

mod common;

use axum::http::StatusCode;
use cobudget_integrations::providers::{MockImageLookup, MockRecipeProvider};
use common::{as_shopper, get, json_request, Shopper, TestContext, MOCK_IMAGE, MOCK_RECIPE};
use serde_json::{json, Value};
use tower::Service as _;

fn ids(products: &Value) -> Vec<&str> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_index_page() {
    let ctx = TestContext::offline();
    let response = ctx.app.clone().call(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(response.headers()["x-frame-options"], "DENY");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).contains("CoBudget"));
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let ctx = TestContext::offline();
    let (status, body) = ctx.send(get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "disconnected");
    assert!(body["pool"]["total_connections"].is_number());
}

#[tokio::test]
async fn test_list_products() {
    let ctx = TestContext::offline();
    let (status, body) = ctx.send(get("/api/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 49);

    let milk = products.iter().find(|p| p["id"] == "DB001").unwrap();
    assert_eq!(milk["name"], "Amul Fresh Milk");
    assert_eq!(milk["price"], 65.0);
    assert!(milk["tags"].is_array());
}

#[tokio::test]
async fn test_recommend_fresh_milk_under_budget() {
    let ctx = TestContext::offline();
    let (status, body) = ctx
        .send(json_request(
            "POST",
            "/api/recommend",
            json!({"prompt": "  Fresh Milk ", "budget": 100}),
        ))
        .await;

    // The search log write fails without a database; the response does not.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], "fresh milk");
    assert_eq!(body["budget"], 100.0);

    let products = body["products"].as_array().unwrap();
    assert_eq!(body["count"], products.len());
    assert!(products.len() <= 12);
    assert_eq!(products[0]["id"], "DB001");
    assert_eq!(products[0]["match_score"], 20);

    for pair in products.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let a_score = a["match_score"].as_u64().unwrap();
        let b_score = b["match_score"].as_u64().unwrap();
        assert!(
            a_score > b_score
                || (a_score == b_score && a["price"].as_f64() <= b["price"].as_f64())
        );
    }
    assert!(products.iter().all(|p| p["price"].as_f64().unwrap() <= 100.0));
}

#[tokio::test]
async fn test_recommend_without_budget_is_unbounded() {
    let ctx = TestContext::offline();
    let (status, body) = ctx
        .send(json_request("POST", "/api/recommend", json!({"prompt": "chicken"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["budget"], 0.0);
    assert!(ids(&body["products"]).contains(&"MF001"));
}

#[tokio::test]
async fn test_recommend_requires_prompt() {
    let ctx = TestContext::offline();
    let (status, body) = ctx
        .send(json_request("POST", "/api/recommend", json!({"prompt": "   ", "budget": 50})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["message"], "Prompt is required");
}

#[tokio::test]
async fn test_recommend_smart() {
    let ctx = TestContext::offline();

    let (status, body) = ctx
        .send(json_request("POST", "/recommend-smart", json!({"keyword": "Biryani"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["products"]), ["AR002", "MD001", "MF001"]);
    assert_eq!(body["count"], 3);

    let (status, body) = ctx
        .send(json_request("POST", "/recommend-smart", json!({"keyword": "picnic"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["products"], json!([]));
}

#[tokio::test]
async fn test_recommend_nutrition() {
    let ctx = TestContext::offline();
    let (status, body) = ctx
        .send(json_request(
            "POST",
            "/recommend-nutrition",
            json!({"preferences": ["eggs", "ALMONDS"]}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["products"]), ["DB003", "MD002"]);

    let (_, body) = ctx
        .send(json_request("POST", "/recommend-nutrition", json!({})))
        .await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_recipe_bot() {
    let ctx = TestContext::offline();
    let (status, body) = ctx
        .send(json_request("POST", "/api/recipe-bot", json!({"prompt": " paneer "})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["recipe"], MOCK_RECIPE);
    assert_eq!(ctx.recipes.as_ref().unwrap().prompts(), vec!["paneer"]);
}

#[tokio::test]
async fn test_recipe_bot_requires_prompt() {
    let ctx = TestContext::offline();
    let (status, body) = ctx
        .send(json_request("POST", "/api/recipe-bot", json!({})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Prompt required");
    assert!(ctx.recipes.as_ref().unwrap().prompts().is_empty());
}

#[tokio::test]
async fn test_recipe_bot_without_provider() {
    let ctx = TestContext::offline_with(None, MockImageLookup::not_found());
    let (status, body) = ctx
        .send(json_request("POST", "/api/recipe-bot", json!({"prompt": "dal"})))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
}

#[tokio::test]
async fn test_recipe_bot_upstream_failure() {
    let ctx = TestContext::offline_with(
        Some(MockRecipeProvider::failing(503)),
        MockImageLookup::not_found(),
    );
    let (status, body) = ctx
        .send(json_request("POST", "/api/recipe-bot", json!({"prompt": "dal"})))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "An internal error occurred");
}

#[tokio::test]
async fn test_image_lookup() {
    let ctx = TestContext::offline();
    let (status, body) = ctx.send(get("/walmart-image?q=amul%20fresh%20milk")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"image": MOCK_IMAGE}));
    assert_eq!(ctx.images.queries(), vec!["amul fresh milk"]);
}

#[tokio::test]
async fn test_image_lookup_nothing_found() {
    let ctx = TestContext::offline_with(None, MockImageLookup::not_found());
    let (status, body) = ctx.send(get("/walmart-image?q=unobtainium")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"image": ""}));
}

#[tokio::test]
async fn test_image_lookup_missing_query() {
    let ctx = TestContext::offline();

    for uri in ["/walmart-image", "/walmart-image?q=", "/walmart-image?q=%20%20"] {
        let (status, body) = ctx.send(get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["message"], "Missing query");
    }
    assert!(ctx.images.queries().is_empty());
}

#[tokio::test]
async fn test_image_lookup_upstream_failure() {
    let ctx = TestContext::offline_with(None, MockImageLookup::failing(502));
    let (status, _) = ctx.send(get("/walmart-image?q=milk")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_protected_routes_require_identity() {
    let ctx = TestContext::offline();
    let item_id = uuid::Uuid::new_v4();

    let requests = vec![
        get("/api/cart"),
        json_request("POST", "/api/cart/add", json!({"product_id": "DB001"})),
        json_request("DELETE", &format!("/api/cart/{}", item_id), json!({})),
        get("/api/budget"),
        json_request("PUT", "/api/budget", json!({"amount": 100, "month": 1, "year": 2025})),
        json_request("POST", "/api/shared-cart/create", json!({"name": "Flat"})),
        json_request("POST", "/api/shared-cart/ABCD1234/add", json!({"product_id": "DB001"})),
        json_request("POST", "/api/shared-cart/ABCD1234/close", json!({})),
    ];

    for request in requests {
        let uri = request.uri().to_string();
        let (status, body) = ctx.send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Sign-in required");
    }
}

#[tokio::test]
async fn test_partial_identity_rejected() {
    let ctx = TestContext::offline();
    let shopper = Shopper::new("partial");

    let mut request = as_shopper(
        json_request("POST", "/api/recommend", json!({"prompt": "milk"})),
        &shopper,
    );
    request.headers_mut().remove("x-user-email");

    let (status, body) = ctx.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_catalog_routes_ignore_identity() {
    // The offline pool cannot reach a database, so resolving the caller
    // would fail with 500; these routes must not try.
    let ctx = TestContext::offline();
    let shopper = Shopper::new("browser");

    let (status, _) = ctx.send(as_shopper(get("/api/products"), &shopper)).await;
    assert_eq!(status, StatusCode::OK);

    let mut partial = as_shopper(get("/api/products"), &shopper);
    partial.headers_mut().remove("x-user-email");
    let (status, _) = ctx.send(partial).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .send(as_shopper(get("/walmart-image?q=milk"), &shopper))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let ctx = TestContext::offline();

    for uri in ["/api/recommend", "/api/recipe-bot", "/recommend-smart"] {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let (status, body) = ctx.send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn test_unrepresentable_budget() {
    let ctx = TestContext::offline();
    let (status, body) = ctx
        .send(json_request(
            "POST",
            "/api/recommend",
            json!({"prompt": "milk", "budget": 1e30}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_mistyped_body_field() {
    let ctx = TestContext::offline();
    let (status, body) = ctx
        .send(json_request("POST", "/recommend-nutrition", json!({"preferences": "eggs"})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_unknown_route_gets_security_headers() {
    let ctx = TestContext::offline();
    let response = ctx.app.clone().call(get("/api/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert!(response.headers().get("strict-transport-security").is_none());
}
