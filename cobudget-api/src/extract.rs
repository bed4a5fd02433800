/// Request extractors that reject with [`ApiError`]
///
/// Axum's own `Json`, `Query` and `Path` answer malformed input with plain
/// text (and 422 for JSON that parses but does not fit the type). These
/// wrappers run the same extraction and turn the rejection into the usual
/// JSON error body with status 400.
///
/// ```
/// use cobudget_api::extract::ApiJson;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Body {
///     prompt: String,
/// }
///
/// async fn handler(ApiJson(body): ApiJson<Body>) -> String {
///     body.prompt
/// }
/// ```

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::IntoResponse,
    };
    use rust_decimal::Decimal;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        budget: Decimal,
    }

    fn json_body(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn rejection_of(request: Request<Body>) -> ApiError {
        ApiJson::<Sample>::from_request(request, &()).await.unwrap_err()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ApiJson(sample) = ApiJson::<Sample>::from_request(json_body(r#"{"budget": 12.5}"#), &())
            .await
            .unwrap();
        assert_eq!(sample.budget, Decimal::new(125, 1));
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let err = rejection_of(json_body("{not json")).await;
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unrepresentable_decimal_is_bad_request() {
        let err = rejection_of(json_body(r#"{"budget": 1e30}"#)).await;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"budget": 1}"#))
            .unwrap();
        let err = rejection_of(request).await;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
