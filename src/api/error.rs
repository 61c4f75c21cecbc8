use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;
use thiserror::Error;

use crate::api::form::FormError;

/// Errors returned from page handlers, rendered as short plain-text bodies
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Model not found")]
    ModelNotFound,

    #[error("Invalid input data: {0}")]
    InvalidInput(#[from] FormError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl ApiError {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ModelNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client; never includes internal details
    fn body(&self) -> &'static str {
        match self {
            ApiError::ModelNotFound => "Model not found",
            ApiError::InvalidInput(_) => "Invalid input data",
            ApiError::Internal(_) | ApiError::Render(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(_) | ApiError::Render(_) => {
                tracing::error!(error = %self, "request failed");
            }
            _ => {
                tracing::debug!(error = %self, "client error");
            }
        }

        (self.status_code(), self.body()).into_response()
    }
}

/// Turn a panicking handler into the same 500 as any other internal error
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic payload".to_string());

    ApiError::Internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ApiError::ModelNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidInput(FormError::Missing("humidity")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_hides_details() {
        let err = ApiError::InvalidInput(FormError::NotNumeric {
            field: "temperature",
            value: "abc".to_string(),
        });
        assert_eq!(err.body(), "Invalid input data");
        assert!(err.to_string().contains("temperature"));

        let err = ApiError::Internal(anyhow::anyhow!("weights corrupted"));
        assert_eq!(err.body(), "Internal Server Error");
    }

    #[test]
    fn test_panic_becomes_internal_error() {
        let response = panic_response(Box::new("index out of bounds"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(42_u32));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
