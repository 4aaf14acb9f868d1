use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use credential_service::config::Config;
use credential_service::domain::credentials::service::CredentialService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const RECOMMENDED_SECRET_BYTES: usize = 32;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        hash_cost = config.password.hash_cost,
        "Configuration loaded"
    );

    if config.jwt.secret.len() < RECOMMENDED_SECRET_BYTES {
        tracing::warn!(
            secret_bytes = config.jwt.secret.len(),
            recommended_bytes = RECOMMENDED_SECRET_BYTES,
            "JWT secret is shorter than recommended for HS256"
        );
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())?
            .with_token_ttl(config.jwt.token_ttl())?
            .with_password_hasher(PasswordHasher::with_cost(config.password.hash_cost)?),
    );
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));

    let credential_service = Arc::new(CredentialService::new(user_repository, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
