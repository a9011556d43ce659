use std::net::SocketAddr;
use tokio::signal;

use company_registry::{api_router, config, database, middleware, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first
    let config = config::Settings::new()?;

    // Initialize structured logging with configuration
    middleware::init_logging(&config.log_level, &config.log_format)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    tracing::info!("Starting company registry backend v{}", env!("CARGO_PKG_VERSION"));

    let cors_layer = middleware::create_cors_layer(config.cors_allow_origins.clone());
    let server_port = config.server_port;

    // Create application state with dependency injection; this opens the
    // database pool and runs migrations.
    let app_state = AppState::new(config).await?;
    let db_pool = app_state.db_pool.clone();

    let app = api_router(app_state)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .layer(middleware::create_logging_layer())
        .layer(cors_layer);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    tracing::info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Pool lifecycle ends with the process: close before exit.
    database::close_pool(&db_pool).await;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
