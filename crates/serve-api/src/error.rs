use std::path::PathBuf;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request, query for `{0}` is missing")]
    MissingParameter(&'static str),

    #[error("Bad request - {name} should be an integer ({reason}).")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Server error - couldn't open database connection")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Server error - query failed: {0}")]
    QueryFailed(String),

    #[error("Bad request - Your data couldn't be retrieved: {0}")]
    Serialization(String),

    #[error("Server error - database did not answer within {0} ms")]
    Timeout(u128),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::QueryFailed(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingParameter(_) => "MISSING_PARAMETER",
            AppError::InvalidParameter { .. } => "INVALID_PARAMETER",
            AppError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            AppError::QueryFailed(_) => "QUERY_FAILED",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL",
        }
    }

    /// Serialization failures surface as 400, matching what clients of the
    /// endpoint have always received for unrenderable data.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_)
            | AppError::InvalidParameter { .. }
            | AppError::Serialization(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::StoreUnavailable { .. }
            | AppError::QueryFailed(_)
            | AppError::Config(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::MissingParameter(_) | AppError::InvalidParameter { .. } => {
                tracing::debug!(code = self.code(), error = %self, "rejected api request");
            }
            AppError::Serialization(_) => {
                tracing::warn!(code = self.code(), error = %self, "could not render result set");
            }
            AppError::StoreUnavailable { path, source } => {
                tracing::error!(code = self.code(), path = %path.display(), error = %source, "failed to open database");
            }
            _ => {
                tracing::error!(code = self.code(), error = %self, "api request failed");
            }
        }

        let mut body = self.to_string();
        body.push('\n');
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
