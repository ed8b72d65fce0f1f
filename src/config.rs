use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

/// Process configuration, read once at startup from the environment
/// (optionally seeded from a `.env` file by the caller).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: String,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub tls_cert: String,
    pub tls_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var("API_KEY")
            .map_err(|_| AppError::Config("API_KEY is not set".to_string()))?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://courses.db?mode=rwc".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .map_err(|_| AppError::Config("BIND_ADDR is not a valid socket address".to_string()))?;

        let tls_cert = env::var("TLS_CERT").unwrap_or_else(|_| "certs/server.crt".to_string());
        let tls_key = env::var("TLS_KEY").unwrap_or_else(|_| "certs/server.key".to_string());

        Ok(Self {
            api_key,
            database_url,
            bind_addr,
            tls_cert,
            tls_key,
        })
    }
}
