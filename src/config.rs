use std::env;
use anyhow::{Context, Result};

pub const DEFAULT_DB_URI: &str = "sqlite://app.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_uri: String,
    pub db_max_connections: u32,
    pub db_seed: bool,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_uri = lookup("DB_URI").unwrap_or_else(|| DEFAULT_DB_URI.to_string());

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;
        if db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be a positive integer");
        }

        let db_seed = match lookup("DB_SEED").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => anyhow::bail!("DB_SEED must be one of true, false, 1, 0, got '{}'", other),
        };

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "5555".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            db_uri,
            db_max_connections,
            db_seed,
            service_port,
            service_host,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Database: {}", self.db_uri);
        tracing::info!("  Pool size: {}", self.db_max_connections);
        tracing::info!("  Seed sample data: {}", self.db_seed);
        tracing::info!("  Service listening on: {}", self.bind_addr());
    }
}
