use std::sync::OnceLock;

use chrono::Duration;
use chrono::Utc;
use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Immutable once built, so a single instance can be shared across request
/// tasks behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
    /// Hash at the configured cost, verified against when no account exists
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl Authenticator {
    /// Token lifetime used when none is configured.
    pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

    /// Longest accepted token lifetime (one year).
    pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 366;

    /// Create a new authenticator with the default hash cost and token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    ///
    /// # Errors
    /// * `JwtError::MissingSecret` - Secret is empty
    pub fn new(jwt_secret: &[u8]) -> Result<Self, AuthenticationError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret)?,
            token_ttl: Duration::hours(Self::DEFAULT_TOKEN_TTL_HOURS),
            decoy_hash: OnceLock::new(),
        })
    }

    /// Replace the token lifetime.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Lifetime is not positive or exceeds `MAX_TOKEN_TTL_HOURS`
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Result<Self, AuthenticationError> {
        if token_ttl <= Duration::zero() {
            return Err(AuthenticationError::InvalidConfiguration(format!(
                "token lifetime must be positive, got {} seconds",
                token_ttl.num_seconds()
            )));
        }

        if token_ttl.num_hours() > Self::MAX_TOKEN_TTL_HOURS {
            return Err(AuthenticationError::InvalidConfiguration(format!(
                "token lifetime must be at most {} hours, got {}",
                Self::MAX_TOKEN_TTL_HOURS,
                token_ttl.num_hours()
            )));
        }

        self.token_ttl = token_ttl;
        Ok(self)
    }

    /// Replace the password hasher (e.g. to change the work factor).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_hash = OnceLock::new();
        self
    }

    /// Lifetime of issued session tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Build session claims for a user, expiring after the configured lifetime.
    ///
    /// # Errors
    /// * `JwtError::EncodingFailed` - Expiration is not representable
    pub fn session_claims(
        &self,
        user_id: impl ToString,
        username: impl Into<String>,
    ) -> Result<Claims, JwtError> {
        Claims::for_user(user_id, username, self.token_ttl)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - JWT claims to encode in token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be checked
    /// * `JwtError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Spend one full password verification without a stored hash.
    ///
    /// Callers run this when the account does not exist so the rejection
    /// costs as much as a wrong password. The decoy hash is computed on
    /// first use at the configured cost.
    ///
    /// # Errors
    /// * `PasswordError` - Decoy hash could not be produced or checked
    pub fn verify_decoy(&self, password: &str) -> Result<(), PasswordError> {
        let decoy = match self.decoy_hash.get() {
            Some(hash) => hash,
            None => {
                let hash = self.password_hasher.hash(DECOY_PASSWORD)?;
                self.decoy_hash.get_or_init(|| hash)
            }
        };

        self.password_hasher.verify(password, decoy)?;
        Ok(())
    }

    /// Generate a JWT without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate a session token and return its claims.
    ///
    /// The signature must verify and the current time must be strictly
    /// before `exp`.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged, or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
