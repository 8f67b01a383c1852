//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! domain crates through `kernel::error::AppError`.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Router,
    http::{self, Method, StatusCode, header},
};
use catalog::{CatalogConfig, CatalogState, PgProductRepository, product_router};
use identity::{IdentityConfig, IdentityState, PgAccountRepository, account_router};
use platform::config;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: &str = "31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,identity=info,catalog=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = config::env_required("DATABASE_URL")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Identity configuration: debug builds may run without a configured secret
    let identity_config = if cfg!(debug_assertions) && config::env_var("JWT_SECRET").is_none() {
        tracing::warn!("JWT_SECRET not set, using a random development secret");
        IdentityConfig::development()
    } else {
        IdentityConfig::from_env()?
    };
    let catalog_config = CatalogConfig::from_env()?;

    let accounts = PgAccountRepository::new(pool.clone(), identity_config.store_timeout);
    let products = PgProductRepository::new(pool.clone(), catalog_config.store_timeout);

    let identity_state = IdentityState::new(accounts, identity_config);
    let catalog_state = CatalogState::new(products, catalog_config);

    // CORS configuration
    let frontend_origins = config::env_or(
        "FRONTEND_ORIGINS",
        "http://localhost:40922,http://127.0.0.1:40922",
    );

    let allowed_origins: Vec<http::HeaderValue> = config::parse_list(&frontend_origins)
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let request_timeout = config::env_duration_secs("REQUEST_TIMEOUT_SECS", Duration::from_secs(30))?;

    // Build router
    let app = Router::new()
        .nest("/api/users", account_router(identity_state.clone()))
        .nest("/api/products", product_router(catalog_state, identity_state))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = config::env_or("PORT", DEFAULT_PORT).parse()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
