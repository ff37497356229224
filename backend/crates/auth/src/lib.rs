//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the session manager
//! - `infra/` - In-memory store implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with handle, password, full name, national id and mobile
//! - Sign-in with username + password, sign-out
//! - Server-side sessions with cookie-based bearer tokens
//! - Session gate for protected routes in any crate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id under a per-user random salt
//! - Unknown handle and wrong password are indistinguishable, in both
//!   response and cost
//! - Only the SHA-256 digest of a session token is stored

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session_manager::SessionManager;
pub use error::{AuthError, AuthResult};
pub use infra::memory::{MemorySessionRepository, MemoryUserRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::{session::Session, user::User};
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
