//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod current_user;
pub mod session_manager;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use session_manager::{IssuedSession, SessionManager};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase, prepare_sign_in};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
