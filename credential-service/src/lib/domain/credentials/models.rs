use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::credentials::errors::CredentialError;
use crate::credentials::errors::PasswordPolicyError;
use crate::credentials::errors::UserIdError;
use crate::credentials::errors::UsernameError;

/// Registered user as held by the credential store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password supplied by a client.
///
/// Never persisted. `Debug` is redacted so the value cannot reach the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// bcrypt only reads the first 72 bytes of its input.
    const MAX_BYTES: usize = 72;

    /// Create a password that bcrypt can hash without truncation.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooLong` - Password is longer than 72 bytes
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        if password.len() > Self::MAX_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_BYTES,
                actual: password.len(),
            });
        }

        Ok(Self(password))
    }

    /// Expose the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: Password,
}

impl RegisterCommand {
    /// Validate raw registration input.
    ///
    /// # Errors
    /// * `InvalidUsername` - Username violates the username rules
    /// * `InvalidPassword` - Password violates the password policy
    pub fn new(username: String, password: String) -> Result<Self, CredentialError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }
}

/// Command to log in with domain types
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: Password,
}

impl LoginCommand {
    /// Parse raw login input.
    ///
    /// Input that could never match a registered account is reported as
    /// `InvalidCredentials`, the same outcome as an unknown user.
    pub fn new(username: String, password: String) -> Result<Self, CredentialError> {
        let username = Username::new(username).map_err(|_| CredentialError::InvalidCredentials)?;
        let password = Password::new(password).map_err(|_| CredentialError::InvalidCredentials)?;
        Ok(Self { username, password })
    }
}

/// Signed session token handed to a client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub const BEARER: &'static str = "Bearer";

    pub fn bearer(access_token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            token_type: Self::BEARER,
            expires_at,
        }
    }
}

/// Authenticated identity attached to a request after its token is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub username: Username,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        let username = Username::new("alice_01-x".to_string()).unwrap();
        assert_eq!(username.as_str(), "alice_01-x");
        assert_eq!(username.to_string(), "alice_01-x");
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            Username::new("al".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
    }

    #[test]
    fn test_username_too_long() {
        assert_eq!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong {
                max: 32,
                actual: 33
            })
        );
    }

    #[test]
    fn test_username_invalid_characters() {
        assert_eq!(
            Username::new("alice smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::new("alice@example".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_password_policy() {
        assert!(Password::new("s3cret".to_string()).is_ok());
        assert!(Password::new("a".repeat(72)).is_ok());
        assert_eq!(Password::new(String::new()), Err(PasswordPolicyError::Empty));
        assert_eq!(
            Password::new("a".repeat(73)),
            Err(PasswordPolicyError::TooLong {
                max: 72,
                actual: 73
            })
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("s3cret".to_string()).unwrap();
        let command = RegisterCommand {
            username: Username::new("alice".to_string()).unwrap(),
            password,
        };

        let rendered = format!("{:?}", command);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_register_command_validation() {
        assert!(matches!(
            RegisterCommand::new("al".to_string(), "s3cret".to_string()),
            Err(CredentialError::InvalidUsername(_))
        ));
        assert!(matches!(
            RegisterCommand::new("alice".to_string(), String::new()),
            Err(CredentialError::InvalidPassword(PasswordPolicyError::Empty))
        ));
    }

    #[test]
    fn test_login_command_hides_validation_details() {
        assert!(matches!(
            LoginCommand::new("a b".to_string(), "s3cret".to_string()),
            Err(CredentialError::InvalidCredentials)
        ));
        assert!(matches!(
            LoginCommand::new("alice".to_string(), String::new()),
            Err(CredentialError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_user_id_round_trip_through_string() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("not-a-uuid").is_err());
    }
}
