use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use restaurant_service::config::Config;
use restaurant_service::domain::authentication::service::AuthService;
use restaurant_service::domain::restaurant::service::RestaurantService;
use restaurant_service::inbound::http::router::create_router;
use restaurant_service::outbound::places::GooglePlacesClient;
use restaurant_service::outbound::repositories::PostgresCredentialStore;
use restaurant_service::outbound::repositories::PostgresRecordRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restaurant_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "restaurant-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        password_cost = config.password.cost,
        access_ttl_secs = config.jwt.access_ttl_secs,
        refresh_ttl_secs = config.jwt.refresh_ttl_secs,
        places_base_url = %config.places.base_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let tokens = TokenService::new(
        config.jwt.access_secret.as_bytes(),
        config.jwt.refresh_secret.as_bytes(),
    )
    .with_ttls(
        chrono::Duration::seconds(config.jwt.access_ttl_secs),
        chrono::Duration::seconds(config.jwt.refresh_ttl_secs),
    );
    let authenticator = Arc::new(Authenticator::new(
        PasswordHasher::with_cost(config.password.cost)?,
        tokens,
    ));

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
    let record_repository = Arc::new(PostgresRecordRepository::new(pg_pool.clone()));
    if config.places.api_key.is_empty() {
        tracing::warn!("places.api_key is empty; restaurant lookups will fail");
    }
    let places_client = Arc::new(GooglePlacesClient::new(&config.places)?);

    let auth_service = Arc::new(AuthService::new(credential_store, authenticator));
    let restaurant_service = Arc::new(RestaurantService::new(places_client, record_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, restaurant_service);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pg_pool.close().await;
    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
