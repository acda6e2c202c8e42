use std::net::SocketAddr;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use me_api::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting me-api");

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Migrations applied");

    let addr = SocketAddr::new(config.host, config.port);
    let app = me_api::build_app(pool, config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let signal = wait_for_signal().await;
    tracing::info!("{signal} received, draining connections");
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use signal::unix::{SignalKind, signal as unix_signal};

    match unix_signal(SignalKind::terminate()) {
        Ok(mut sigterm) => tokio::select! {
            _ = ctrl_c() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        },
        Err(e) => {
            tracing::warn!("SIGTERM handler unavailable, stopping on Ctrl+C only: {e}");
            ctrl_c().await;
            "SIGINT"
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    ctrl_c().await;
    "Ctrl+C"
}

/// Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Ctrl+C handler unavailable: {e}");
        std::future::pending::<()>().await;
    }
}
