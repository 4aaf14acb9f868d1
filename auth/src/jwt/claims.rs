use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::JwtError;

/// Session token claims.
///
/// Carries the identity of the logged-in user plus the RFC 7519 `iat` and
/// `exp` timestamps. Every session token has an expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username at the time the token was issued
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username of the principal
    /// * `lifetime` - Time until the token expires
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration falls outside the representable time range
    pub fn for_user(
        user_id: impl ToString,
        username: impl Into<String>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        Self::issued_at(user_id, username, Utc::now(), lifetime)
    }

    /// Create claims for a user issued at an explicit instant.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration falls outside the representable time range
    pub fn issued_at(
        user_id: impl ToString,
        username: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::EncodingFailed(format!(
                "token lifetime of {} seconds overflows the expiration time",
                lifetime.num_seconds()
            ))
        })?;

        Ok(Self {
            sub: user_id.to_string(),
            username: username.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Check if the token is expired.
    ///
    /// A token stops being valid at the instant `exp` is reached.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }

    /// Expiration as a UTC timestamp, `None` if `exp` is out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
