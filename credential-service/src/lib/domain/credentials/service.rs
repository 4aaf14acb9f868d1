use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::credentials::errors::CredentialError;
use crate::credentials::models::LoginCommand;
use crate::credentials::models::Principal;
use crate::credentials::models::RegisterCommand;
use crate::credentials::models::SessionToken;
use crate::credentials::models::User;
use crate::credentials::models::UserId;
use crate::credentials::models::Username;
use crate::credentials::ports::CredentialServicePort;
use crate::credentials::ports::UserRepository;

/// Domain service implementation for the credential lifecycle.
///
/// Holds no mutable state: the repository owns the user records and the
/// authenticator is immutable, so one instance serves every request.
/// bcrypt work runs on the blocking thread pool.
pub struct CredentialService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> CredentialService<UR>
where
    UR: UserRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token codec, already configured
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> CredentialServicePort for CredentialService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, CredentialError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::info!(username = %command.username, "Registration rejected: username taken");
            return Err(CredentialError::DuplicateUsername(
                command.username.to_string(),
            ));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await?
                .map_err(|e| CredentialError::PasswordHashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<SessionToken, CredentialError> {
        let Some(user) = self.repository.find_by_username(&command.username).await? else {
            // Same bcrypt work as a wrong password.
            let authenticator = Arc::clone(&self.authenticator);
            let password = command.password;
            tokio::task::spawn_blocking(move || authenticator.verify_decoy(password.expose()))
                .await?
                .map_err(|e| CredentialError::PasswordHashing(e.to_string()))?;

            tracing::warn!(username = %command.username, "Login rejected");
            return Err(CredentialError::InvalidCredentials);
        };

        let claims = self
            .authenticator
            .session_claims(user.id, user.username.as_str())
            .map_err(|e| CredentialError::TokenIssuance(e.to_string()))?;
        let expires_at = claims.expires_at().ok_or_else(|| {
            CredentialError::TokenIssuance("Token expiry out of range".to_string())
        })?;

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash;
        let password = command.password;
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &stored_hash, &claims)
        })
        .await?;

        match result {
            Ok(authenticated) => {
                tracing::info!(user_id = %user.id, username = %user.username, "User logged in");
                Ok(SessionToken::bearer(authenticated.access_token, expires_at))
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(username = %user.username, "Login rejected");
                Err(CredentialError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => {
                Err(CredentialError::PasswordHashing(e.to_string()))
            }
            Err(AuthenticationError::JwtError(e)) => {
                Err(CredentialError::TokenIssuance(e.to_string()))
            }
            Err(e @ AuthenticationError::InvalidConfiguration(_)) => {
                Err(CredentialError::Unknown(e.to_string()))
            }
        }
    }

    fn authorize(&self, token: &str) -> Result<Principal, CredentialError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Session token rejected");
            CredentialError::Unauthorized(e.to_string())
        })?;

        let id = UserId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Session token carries an invalid subject");
            CredentialError::Unauthorized(format!("Invalid subject claim: {}", e))
        })?;

        let username = Username::new(claims.username).map_err(|e| {
            tracing::warn!(error = %e, "Session token carries an invalid username");
            CredentialError::Unauthorized(format!("Invalid username claim: {}", e))
        })?;

        Ok(Principal { id, username })
    }
}
