use std::sync::Arc;

use auth::Authenticator;
use auth::RequestAuthorizer;
use device_service::config::Config;
use device_service::domain::device::service::DeviceService;
use device_service::domain::role::service::RoleService;
use device_service::domain::user::service::UserService;
use device_service::inbound::http::router::create_router;
use device_service::inbound::http::router::AppState;
use device_service::outbound::repositories::PostgresDeviceRepository;
use device_service::outbound::repositories::PostgresRoleRepository;
use device_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "device_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "device-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        acquire_timeout_secs = config.database.acquire_timeout_secs,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_config = config.jwt.token_config();
    let authenticator = Arc::new(Authenticator::new(&token_config));
    let authorizer = Arc::new(RequestAuthorizer::new(
        authenticator.token_codec().clone(),
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let role_repository = Arc::new(PostgresRoleRepository::new(pg_pool.clone()));
    let device_repository = Arc::new(PostgresDeviceRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            user_repository,
            Arc::clone(&role_repository),
            authenticator,
        )),
        role_service: Arc::new(RoleService::new(role_repository)),
        device_service: Arc::new(DeviceService::new(device_repository)),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, authorizer, config.server.request_timeout());

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
