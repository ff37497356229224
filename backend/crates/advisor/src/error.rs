//! Advisor Error Types
//!
//! Failures of the chat endpoint. None of them touch ledger state.

use auth::AuthError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Advisor-specific result type alias
pub type AdvisorResult<T> = Result<T, AdvisorError>;

const NOT_CONFIGURED_MESSAGE: &str =
    "AI chat service is not properly configured. Please contact support.";
const AUTH_FAILED_MESSAGE: &str = "AI service authentication failed. Please contact support.";
const UNAVAILABLE_MESSAGE: &str =
    "AI chat service is temporarily unavailable. Please try again later.";
const GENERIC_MESSAGE: &str =
    "I'm having trouble processing your request right now. Try again later.";

/// Advisor-specific error variants
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// No API key configured
    #[error("Completion service is not configured")]
    NotConfigured,

    /// Upstream rejected our credentials
    #[error("Completion service rejected credentials")]
    AuthFailed,

    /// Upstream unreachable or timed out
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),

    /// Any other upstream failure
    #[error("Completion service failed: {0}")]
    Upstream(String),

    /// Request body or field failed validation
    #[error("{0}")]
    MalformedInput(String),

    /// Missing or invalid session
    #[error("Authentication required")]
    Unauthenticated,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdvisorError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdvisorError::NotConfigured
            | AdvisorError::AuthFailed
            | AdvisorError::Unavailable(_) => ErrorKind::ServiceUnavailable,
            AdvisorError::Upstream(_) | AdvisorError::Internal(_) => {
                ErrorKind::InternalServerError
            }
            AdvisorError::MalformedInput(_) => ErrorKind::BadRequest,
            AdvisorError::Unauthenticated => ErrorKind::Unauthorized,
        }
    }

    /// Convert to AppError
    ///
    /// Upstream detail stays in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AdvisorError::NotConfigured => AppError::service_unavailable(NOT_CONFIGURED_MESSAGE),
            AdvisorError::AuthFailed => AppError::service_unavailable(AUTH_FAILED_MESSAGE),
            AdvisorError::Unavailable(_) => AppError::service_unavailable(UNAVAILABLE_MESSAGE),
            AdvisorError::Upstream(_) | AdvisorError::Internal(_) => {
                AppError::internal(GENERIC_MESSAGE)
            }
            AdvisorError::MalformedInput(_) | AdvisorError::Unauthenticated => {
                AppError::new(self.kind(), self.to_string())
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AdvisorError::NotConfigured | AdvisorError::AuthFailed => {
                tracing::error!(error = %self, "Advisor misconfigured");
            }
            AdvisorError::Unavailable(detail) => {
                tracing::warn!(detail = %detail, "Advisor upstream unavailable");
            }
            AdvisorError::Upstream(detail) | AdvisorError::Internal(detail) => {
                tracing::error!(detail = %detail, "Advisor request failed");
            }
            _ => {
                tracing::debug!(error = %self, "Advisor error");
            }
        }
    }
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        err.to_app_error()
    }
}

impl From<JsonRejection> for AdvisorError {
    fn from(rejection: JsonRejection) -> Self {
        AdvisorError::MalformedInput(rejection.body_text())
    }
}

impl From<AuthError> for AdvisorError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated | AuthError::UserNotFound => AdvisorError::Unauthenticated,
            other => AdvisorError::Internal(other.to_string()),
        }
    }
}
