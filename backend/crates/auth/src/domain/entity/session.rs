//! Session Entity
//!
//! Server-side record binding a session token to a user. Keyed by the
//! token's digest; the token itself is never stored.

use chrono::{DateTime, TimeDelta, Utc};
use kernel::id::UserId;

use crate::domain::value_object::session_token::SessionKey;

/// Server-side session record
#[derive(Debug, Clone)]
pub struct Session {
    pub key: SessionKey,
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    /// Absolute expiry, fixed at issuance
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session that expires `ttl` after `now`
    ///
    /// Returns `None` when the expiry falls outside the representable range.
    pub fn issue(
        key: SessionKey,
        user_id: UserId,
        now: DateTime<Utc>,
        ttl: TimeDelta,
    ) -> Option<Self> {
        Some(Self {
            key,
            user_id,
            issued_at: now,
            expires_at: now.checked_add_signed(ttl)?,
        })
    }

    /// Whether the session has expired as of `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
