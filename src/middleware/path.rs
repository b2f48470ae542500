use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// `Path` extractor whose rejection is rendered as the envelope.
///
/// A segment that does not parse (e.g. `/todo/abc`) cannot name an existing
/// row, so it is reported as not found.
#[derive(Debug)]
pub struct PathParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParams(value)),
            Err(rejection) => {
                tracing::debug!("Unparseable path {}: {}", parts.uri.path(), rejection.body_text());
                Err(ApiError::not_found("Not found"))
            }
        }
    }
}
