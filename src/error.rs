// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::validation::FieldErrors;

/// HTTP API error rendered as the failure half of the response envelope
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation {
        message: String,
        errors: FieldErrors,
    },

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    Internal {
        message: String,
        error: String,
    },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Internal { message, .. } => message,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "message": self.message(),
        });

        match self {
            ApiError::Validation { errors, .. } if !errors.is_empty() => {
                body["errors"] = json!(errors);
            }
            ApiError::Internal { error, .. } => {
                body["error"] = Value::String(error.clone());
            }
            _ => {}
        }

        body
    }
}

// Static constructor methods
impl ApiError {
    /// Builds a validation error whose message summarises the first failure
    pub fn validation(errors: FieldErrors) -> Self {
        let total: usize = errors.values().map(Vec::len).sum();
        let first = errors
            .values()
            .flat_map(|messages| messages.iter())
            .next()
            .cloned()
            .unwrap_or_else(|| "The given data was invalid.".to_string());

        let message = match total {
            0 | 1 => first,
            2 => format!("{} (and 1 more error)", first),
            n => format!("{} (and {} more errors)", first, n - 1),
        };

        ApiError::Validation { message, errors }
    }

    pub fn malformed_body(detail: impl Into<String>) -> Self {
        ApiError::Validation {
            message: format!("Malformed JSON body: {}", detail.into()),
            errors: FieldErrors::new(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>, error: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            message: message.into(),
            error: error.to_string(),
        }
    }

    /// Replaces the client-facing message of an internal error, keeping the detail
    pub fn context(self, message: impl Into<String>) -> Self {
        match self {
            ApiError::Internal { error, .. } => ApiError::Internal {
                message: message.into(),
                error,
            },
            other => other,
        }
    }
}

// Convert other error types to ApiError
impl From<crate::database::DatabaseError> for ApiError {
    fn from(err: crate::database::DatabaseError) -> Self {
        use crate::database::DatabaseError;

        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            other => ApiError::internal("An error occurred while processing your request.", other),
        }
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        use crate::auth::AuthError;

        match err {
            AuthError::MissingToken | AuthError::MalformedToken | AuthError::InvalidToken => {
                ApiError::unauthorized("Unauthenticated.")
            }
            AuthError::InvalidCredentials => {
                ApiError::unauthorized("The provided credentials are incorrect.")
            }
            other => ApiError::internal("An error occurred during authentication.", other),
        }
    }
}

impl From<crate::validation::ValidationErrors> for ApiError {
    fn from(err: crate::validation::ValidationErrors) -> Self {
        ApiError::validation(err.into_inner())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Internal { message, error } = &self {
            tracing::error!("{}: {}", message, error);
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
