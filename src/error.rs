use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Unified error type for the relay servers and client
#[derive(Error, Debug)]
pub enum RelayError {
    // Request errors
    #[error("Missing payload field")]
    MissingPayload,

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Client errors
    #[error("WebSocket client error: {0}")]
    Client(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RelayError::MissingPayload => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            RelayError::InvalidConfig(_)
            | RelayError::Io(_)
            | RelayError::Client(_)
            | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for RelayError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        RelayError::Client(err.to_string())
    }
}

impl From<url::ParseError> for RelayError {
    fn from(err: url::ParseError) -> Self {
        RelayError::Client(format!("invalid url: {}", err))
    }
}
