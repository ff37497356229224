//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use kernel::money::Cents;
use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Longest session lifetime accepted from configuration (one year)
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Absolute session lifetime from issuance (24 hours)
    pub session_ttl: Duration,
    /// Period of the background expired-session sweep
    pub session_sweep_interval: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Balance every new account opens with
    pub starting_balance: Cents,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "bank_session".to_string(),
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            session_sweep_interval: Duration::from_secs(24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            starting_balance: Cents::new(10_000),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Cookie attributes for the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }
}
