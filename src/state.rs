use sqlx::SqlitePool;

/// Shared application context handed to the router. Replaces any
/// process-wide globals: the pool and the access key travel together
/// through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub api_key: String,
}
