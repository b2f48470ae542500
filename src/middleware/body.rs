use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// JSON request body that rejects with the envelope instead of plain text.
///
/// A request without a JSON content type is treated as an empty object so
/// the rule set reports every required field.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(JsonBody(Value::Object(Map::new()))),
            Err(rejection) => Err(ApiError::malformed_body(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, StatusCode};

    #[tokio::test]
    async fn missing_content_type_is_an_empty_object() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let JsonBody(value) = JsonBody::from_request(req, &()).await.unwrap();
        assert_eq!(value, Value::Object(Map::new()));
    }

    #[tokio::test]
    async fn syntax_errors_are_validation_failures() {
        let req = Request::builder()
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let err = JsonBody::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.message().starts_with("Malformed JSON body"));
    }
}
