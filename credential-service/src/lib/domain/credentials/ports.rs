use async_trait::async_trait;

use crate::credentials::errors::CredentialError;
use crate::credentials::models::LoginCommand;
use crate::credentials::models::Principal;
use crate::credentials::models::RegisterCommand;
use crate::credentials::models::SessionToken;
use crate::credentials::models::User;
use crate::credentials::models::Username;

/// Port for the credential lifecycle: register, login and authorize.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Stored user record
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `PasswordHashing` - Hashing the password failed
    /// * `StoreUnavailable` - Credential store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, CredentialError>;

    /// Verify credentials and mint a session token.
    ///
    /// # Arguments
    /// * `command` - Username and plaintext password
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password (indistinguishable)
    /// * `TokenIssuance` - Signing the token failed
    /// * `StoreUnavailable` - Credential store operation failed
    async fn login(&self, command: LoginCommand) -> Result<SessionToken, CredentialError>;

    /// Validate a session token and resolve its principal.
    ///
    /// # Arguments
    /// * `token` - Compact session token
    ///
    /// # Returns
    /// Principal embedded in the token
    ///
    /// # Errors
    /// * `Unauthorized` - Token is malformed, forged or expired
    fn authorize(&self, token: &str) -> Result<Principal, CredentialError>;
}

/// Persistence operations for user records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `StoreUnavailable` - Database operation failed
    async fn create(&self, user: User) -> Result<User, CredentialError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, CredentialError>;
}
