//! Ledger Error Types
//!
//! Ledger-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Ledger-specific result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Seconds a client should wait before retrying a `Busy` request
pub const BUSY_RETRY_AFTER_SECS: u64 = 1;

/// Ledger-specific error variants
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A debit would take the balance below zero
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Request body or field failed validation
    #[error("{0}")]
    MalformedInput(String),

    /// The account's ledger lock could not be acquired in time
    #[error("Account is busy, please retry")]
    Busy,

    /// Owning user no longer exists
    #[error("Account not found")]
    AccountNotFound,

    /// Missing or invalid session
    #[error("Authentication required")]
    Unauthenticated,

    /// Internal error (detail is logged, never returned)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InsufficientFunds | LedgerError::MalformedInput(_) => {
                ErrorKind::BadRequest
            }
            LedgerError::Busy => ErrorKind::ServiceUnavailable,
            LedgerError::AccountNotFound => ErrorKind::NotFound,
            LedgerError::Unauthenticated => ErrorKind::Unauthorized,
            LedgerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether retrying the identical request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Busy)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            LedgerError::Internal(_) => AppError::internal("Internal server error"),
            LedgerError::InsufficientFunds => AppError::bad_request(self.to_string())
                .with_action("Reduce the amount or add funds first"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LedgerError::Internal(msg) => {
                tracing::error!(message = %msg, "Ledger internal error");
            }
            LedgerError::Busy => {
                tracing::warn!("Ledger lock wait timed out");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger error");
            }
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        self.log();
        let retryable = self.is_retryable();
        let mut response = self.to_app_error().into_response();
        if retryable {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(BUSY_RETRY_AFTER_SECS),
            );
        }
        response
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        err.to_app_error()
    }
}

impl From<JsonRejection> for LedgerError {
    fn from(rejection: JsonRejection) -> Self {
        LedgerError::MalformedInput(rejection.body_text())
    }
}

impl From<AuthError> for LedgerError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound => LedgerError::AccountNotFound,
            AuthError::Unauthenticated | AuthError::InvalidCredentials => {
                LedgerError::Unauthenticated
            }
            AuthError::MalformedInput(msg) => LedgerError::MalformedInput(msg),
            other => LedgerError::Internal(other.to_string()),
        }
    }
}
