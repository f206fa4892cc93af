//! Unified application error handling.
//!
//! `AppError` wraps the domain taxonomy together with the infrastructure
//! failures that can pass through the data-access layer, and renders itself
//! as an HTTP response. Public model errors are shown verbatim (formatted);
//! everything else is logged here and replaced with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{CryptoError, ModelError, GENERIC_ERROR_MESSAGE};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Domain taxonomy
    #[error(transparent)]
    Model(#[from] ModelError),

    // Infrastructure passthroughs
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Image storage error: {0}")]
    Storage(#[from] std::io::Error),

    // Request-level errors raised at the HTTP boundary
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Internal
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// The model error this wraps, if any.
    pub fn model(&self) -> Option<ModelError> {
        match self {
            AppError::Model(e) => Some(*e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.model() == Some(ModelError::NotFound)
    }

    /// Whether the message may be shown to the client as-is.
    pub fn is_public(&self) -> bool {
        match self {
            AppError::Model(e) => e.is_public(),
            AppError::Unauthorized | AppError::BadRequest(_) => true,
            _ => false,
        }
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Model(e) if e.is_public() => e.code(),
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::BadRequest(_) => "BAD_REQUEST",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Model(e) if e.is_public() => match e {
                ModelError::NotFound => StatusCode::NOT_FOUND,
                ModelError::InvalidPassword => StatusCode::UNAUTHORIZED,
                ModelError::EmailTaken => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            },
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Model(e) => match e.public_message() {
                Some(message) => message,
                None => {
                    tracing::error!(code = e.code(), "Private model error: {}", e);
                    GENERIC_ERROR_MESSAGE.to_string()
                }
            },
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Unauthorized => "You must be signed in to do that.".to_string(),

            // Hide details for infrastructure errors
            AppError::Crypto(e) => {
                tracing::error!("Crypto error: {:?}", e);
                GENERIC_ERROR_MESSAGE.to_string()
            }
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                GENERIC_ERROR_MESSAGE.to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Image storage error: {:?}", e);
                GENERIC_ERROR_MESSAGE.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::Model(ModelError::NotFound))
    }
}

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
