use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, AuthError};
use crate::database::models::User;
use crate::database::Scope;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, injected into request extensions by [`require_auth`]
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user: User,
    /// Row id of the token used for this request; logout revokes exactly this one
    pub token_id: i64,
}

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }

    /// Scope for tables owned directly by the caller
    pub fn scope(&self) -> Scope {
        Scope::Owner(self.user.id)
    }
}

/// Bearer token middleware that resolves the caller and injects [`AuthUser`]
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(|e| {
        tracing::debug!("Rejected request to {}: {}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    let (user, access_token) = auth::authenticate(&state.pool, token).await.map_err(|e| {
        if !matches!(e, AuthError::Database(_)) {
            tracing::warn!("Rejected bearer token for {}: {}", request.uri().path(), e);
        }
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AuthUser {
        user,
        token_id: access_token.id,
    });

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::MalformedToken)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err(AuthError::MissingToken),
        None => Err(AuthError::MalformedToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer 1|abc")).unwrap(), "1|abc");
    }

    #[test]
    fn rejects_missing_or_foreign_schemes() {
        assert!(matches!(extract_bearer_token(&HeaderMap::new()), Err(AuthError::MissingToken)));
        assert!(matches!(extract_bearer_token(&headers("Bearer   ")), Err(AuthError::MissingToken)));
        assert!(matches!(extract_bearer_token(&headers("Basic dTpw")), Err(AuthError::MalformedToken)));
    }
}
