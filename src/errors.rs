//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::{PATH_LOGIN, PATH_RESET_PASSWORD, PATH_UPLOAD_TEMPLATE};
use crate::domain::AmountError;

/// Application error types
/// SOLID - Open/Closed: Extend via new variants without modifying behavior
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Password reset required")]
    PasswordResetRequired { email: String },

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Business {business_id} has no invoice template")]
    TemplateMissing { business_id: i64 },

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Amount(#[from] AmountError),

    // Invoice backend errors
    #[error("Invoice backend returned {status}")]
    Backend { status: u16, detail: Option<String> },

    #[error("Invoice backend unreachable")]
    Http(#[from] reqwest::Error),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    /// Front-end page the viewer should be sent to
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<String>,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            AppError::PasswordResetRequired { .. } => "PASSWORD_RESET_REQUIRED",
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::TemplateMissing { .. } => "TEMPLATE_MISSING",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Amount(_) => "INVALID_AMOUNT",
            AppError::Backend { .. } | AppError::Http(_) => "BACKEND_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials(_) | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden | AppError::PasswordResetRequired { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::TemplateMissing { .. } => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::Amount(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Backend { status, .. } => backend_status(*status),
            AppError::Http(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::InvalidCredentials(msg) => msg.clone(),
            AppError::Amount(e) => e.to_string(),
            AppError::PasswordResetRequired { .. } => {
                "Please set a new password before signing in".to_string()
            }

            // Client-side backend rejections carry a useful detail
            AppError::Backend {
                status,
                detail: Some(detail),
            } if *status < 500 => detail.clone(),

            // Hide details for internal/security errors
            AppError::Backend { status, detail } => {
                tracing::error!("Invoice backend error {}: {:?}", status, detail);
                "The invoice service could not complete the request".to_string()
            }
            AppError::Http(e) => {
                tracing::error!("Invoice backend request failed: {:?}", e);
                "The invoice service is unavailable".to_string()
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Front-end page implied by the error, if any
    fn redirect(&self) -> Option<String> {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => Some(PATH_LOGIN.to_string()),
            AppError::PasswordResetRequired { email } => Some(reset_password_path(email)),
            AppError::TemplateMissing { business_id } => {
                Some(format!("{}/{}", PATH_UPLOAD_TEMPLATE, business_id))
            }
            _ => None,
        }
    }

    /// Whether the backend answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::NotFound | AppError::Backend { status: 404, .. }
        )
    }
}

/// Map a backend status onto the status the portal answers with.
fn backend_status(status: u16) -> StatusCode {
    match status {
        400..=499 => StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST),
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// `/reset-password?emailId=<email>` with the address query-encoded.
fn reset_password_path(email: &str) -> String {
    let Ok(mut url) = reqwest::Url::parse("http://portal.local") else {
        return PATH_RESET_PASSWORD.to_string();
    };
    url.set_path(PATH_RESET_PASSWORD);
    url.query_pairs_mut().append_pair("emailId", email);
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                redirect: self.redirect(),
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
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn backend(status: u16, detail: Option<String>) -> Self {
        AppError::Backend { status, detail }
    }
}
