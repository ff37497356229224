//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`]
//! and the HTTP rendering of [`AppError`].

use super::app_error::AppError;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("Internal server error").with_source(err)
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// JSON body for an error response.
///
/// `{ "status": 400, "title": "Bad Request", "message": "...", "action": "..." }`
/// with `action` omitted when unset. The source error is never rendered.
pub fn error_body(err: &AppError) -> serde_json::Value {
    let mut body = serde_json::json!({
        "status": err.status_code(),
        "title": err.kind().as_str(),
        "message": err.message(),
    });
    if let (Some(action), Some(map)) = (err.action(), body.as_object_mut()) {
        map.insert("action".to_string(), serde_json::Value::from(action));
    }
    body
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(error_body(&self))).into_response()
    }
}
