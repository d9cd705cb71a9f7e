// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// The admin UI predates this service and matches on the exact body shapes:
/// authentication failures use an `erro` key, storage and throttling
/// failures use `error`. Both are preserved as-is.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    InvalidCredential,
    Unauthenticated,

    // 403 Forbidden
    InvalidToken,

    // 429 Too Many Requests
    RateLimited,

    // 500 Internal Server Error
    ConfigurationError,
    Storage(String),
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredential => StatusCode::UNAUTHORIZED,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ConfigurationError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::BadRequest(msg) => json!({ "erro": msg }),
            ApiError::InvalidCredential => json!({ "erro": "Senha incorreta." }),
            ApiError::Unauthenticated => json!({ "erro": "Não autenticado." }),
            ApiError::InvalidToken => json!({ "erro": "Token inválido." }),
            ApiError::RateLimited => {
                json!({ "error": "Muitas tentativas. Tente novamente mais tarde." })
            }
            ApiError::ConfigurationError => json!({ "erro": "Admin hash não configurado." }),
            ApiError::Storage(msg) => json!({ "error": msg }),
            ApiError::Internal(msg) => json!({ "erro": msg }),
        }
    }

    /// Wrap a storage failure: log the real error, return the operation's
    /// generic message to the client.
    pub fn storage(err: StoreError, message: impl Into<String>) -> Self {
        tracing::error!("storage error: {}", err);
        ApiError::Storage(message.into())
    }
}

impl From<crate::auth::JwtError> for ApiError {
    fn from(err: crate::auth::JwtError) -> Self {
        tracing::error!("token error: {}", err);
        ApiError::Internal("Erro interno.".to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
