#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use auth::PasswordHasher;
use credential_service::credentials::errors::CredentialError;
use credential_service::credentials::models::User;
use credential_service::credentials::models::Username;
use credential_service::credentials::ports::UserRepository;
use credential_service::credentials::service::CredentialService;
use credential_service::inbound::http::router::create_router;
use tokio::sync::RwLock;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store kept in process memory, keyed by username.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Copy of every stored user record
    pub async fn users_snapshot(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, CredentialError> {
        let mut users = self.users.write().await;
        let key = user.username.as_str().to_string();
        if users.contains_key(&key) {
            return Err(CredentialError::DuplicateUsername(key));
        }
        users.insert(key, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, CredentialError> {
        Ok(self.users.read().await.get(username.as_str()).cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::default());

        // Minimum bcrypt cost keeps the suite fast.
        let authenticator = Arc::new(
            Authenticator::new(TEST_JWT_SECRET)
                .expect("Failed to create authenticator")
                .with_password_hasher(
                    PasswordHasher::with_cost(4).expect("Failed to create password hasher"),
                ),
        );

        let credential_service = Arc::new(CredentialService::new(
            Arc::clone(&repository),
            authenticator,
        ));

        let router = create_router(credential_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jwt_handler = JwtHandler::new(TEST_JWT_SECRET).expect("Failed to create JWT handler");

        Self {
            address,
            port,
            repository,
            api_client: reqwest::Client::new(),
            jwt_handler,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the raw response
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the raw response
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register, log in and return the issued token
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        self.register(username, password).await;
        let body: serde_json::Value = self
            .login(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in login response")
            .to_string()
    }

    /// Sign arbitrary claims with the server's secret
    pub fn sign(&self, claims: &Claims) -> String {
        self.jwt_handler
            .encode(claims)
            .expect("Failed to sign claims")
    }
}
