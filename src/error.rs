//! Application error types

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream answered with a non-success status
    #[error("{source_name} HTTP {status}: {body}")]
    Upstream {
        source_name: String,
        status: u16,
        body: String,
    },

    /// Upstream payload does not have the documented shape
    #[error("Malformed upstream data: {0}")]
    MalformedUpstreamData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status used when this error reaches a handler
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error and its source chain, one link per line
    pub fn stack(&self) -> String {
        let mut stack = format!("{}: {}", self.kind(), self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        stack
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Http(_) => "HttpError",
            AppError::Serialization(_) => "SerializationError",
            AppError::Upstream { .. } => "UpstreamError",
            AppError::MalformedUpstreamData(_) => "MalformedUpstreamDataError",
            AppError::Config(_) => "ConfigError",
            AppError::NotFound(_) => "NotFoundError",
            AppError::Io(_) => "IoError",
            AppError::Internal(_) => "InternalError",
        }
    }
}

/// Serializable error body returned to the dashboard
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub stack: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            error: err.to_string(),
            stack: err.stack(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
