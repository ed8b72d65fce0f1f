use std::time::Duration;

use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courseapi::config::AppConfig;
use courseapi::routes::router;
use courseapi::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "courseapi=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    info!("database opened at {}", config.database_url);

    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        db: pool.clone(),
        api_key: config.api_key.clone(),
    };
    let app = router(state);

    let tls = RustlsConfig::from_pem_file(&config.tls_cert, &config.tls_key).await?;

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(5)));
        }
    });

    info!("listening on https://{}", config.bind_addr);
    axum_server::bind_rustls(config.bind_addr, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    pool.close().await;
    info!("database closed");

    Ok(())
}
