//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quire_docs::DocServiceError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// The caller holds no valid credential for a protected documentation.
    #[error("Unauthorized")]
    Unauthorized,

    /// Documentation metadata could not be read.
    #[error("Metadata lookup failed: {0}")]
    MetadataLookup(#[from] DocServiceError),

    /// No documentation with this ID.
    #[error("Documentation {0} not found")]
    DocumentationNotFound(u32),

    /// Malformed request parameter.
    #[error("{0}")]
    BadRequest(String),

    /// Token signature verified, but the token is past its expiry.
    #[error("expired JWT token")]
    TokenExpired,

    /// Token failed verification.
    #[error("invalid JWT token")]
    TokenInvalid,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "user_unauthorized_route"}),
            ),
            Self::MetadataLookup(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"status": "error", "message": e.to_string()}),
            ),
            Self::DocumentationNotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({"status": "error", "message": "documentation not found"}),
            ),
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({"status": "error", "message": message}),
            ),
            Self::TokenExpired | Self::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                json!({"status": "error", "message": self.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServerError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServerError::MetadataLookup(DocServiceError::Unavailable("db".to_owned()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::DocumentationNotFound(3).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::BadRequest("x".to_owned()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::TokenExpired.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
