//! Error handling module for the WHOIS squads server.
//!
//! Provides centralized error types with mapping to HTTP status codes and an HTML error page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::views;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const MALFORMED_RESPONSE: &str = "MALFORMED_RESPONSE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The WHOIS API has no such record
    NotFound(String),
    /// Transport failure or unexpected status from the WHOIS API
    Upstream(String),
    /// WHOIS API answered with a body we could not decode
    MalformedResponse(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Upstream(_) => codes::UPSTREAM_ERROR,
            AppError::MalformedResponse(_) => codes::MALFORMED_RESPONSE,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Upstream(msg) => msg.clone(),
            AppError::MalformedResponse(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }

    /// Message safe to show to a visitor.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "The requested page could not be found.",
            AppError::Upstream(_) | AppError::MalformedResponse(_) => {
                "The directory is unavailable right now. Please try again later."
            }
            AppError::Internal(_) => "Something went wrong on our side.",
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("WHOIS request error: {:?}", err);
        if err.is_decode() {
            AppError::MalformedResponse(format!("WHOIS response error: {}", err))
        } else {
            AppError::Upstream(format!("WHOIS request error: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::MalformedResponse(format!("JSON error: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(status = status.as_u16(), "Request failed: {}", self);
        (status, Html(views::error_page(status, self.public_message()))).into_response()
    }
}
