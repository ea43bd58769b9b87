// src/api/error.rs
// JSON error responses for the HTTP API
//
// Storage failures never reach this type: the corpus degrades to built-in
// phrases instead. What is left is routing and feed rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::fmt;
use tracing::error;

/// Machine-readable error codes returned in `error_code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    RouteNotFound,
    FeedRenderFailed,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::RouteNotFound => StatusCode::NOT_FOUND,
            ErrorCode::FeedRenderFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    /// Request path, echoed back for unknown routes
    pub path: Option<String>,
}

impl ApiError {
    pub fn route_not_found(path: &str) -> Self {
        Self {
            code: ErrorCode::RouteNotFound,
            message: format!("No route for {path}"),
            path: Some(path.to_string()),
        }
    }

    /// Log the render failure and hide its details from the client
    pub fn feed_render(cause: impl fmt::Display) -> Self {
        error!(error = %cause, "Failed to render feed");
        Self {
            code: ErrorCode::FeedRenderFailed,
            message: "Failed to render feed".to_string(),
            path: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = json!({
            "error": true,
            "message": self.message,
            "status": status.as_u16(),
            "error_code": self.code,
        });

        if let Some(path) = self.path {
            body["path"] = json!(path);
        }

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_not_found_keeps_path() {
        let error = ApiError::route_not_found("/nope");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.path.as_deref(), Some("/nope"));
        assert_eq!(error.to_string(), "No route for /nope");
    }

    #[test]
    fn test_feed_render_hides_cause() {
        let error = ApiError::feed_render("writer exploded");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "Failed to render feed");
        assert!(error.path.is_none());
    }

    #[test]
    fn test_error_codes_serialize_screaming_snake() {
        assert_eq!(json!(ErrorCode::RouteNotFound), "ROUTE_NOT_FOUND");
        assert_eq!(json!(ErrorCode::FeedRenderFailed), "FEED_RENDER_FAILED");
    }
}
