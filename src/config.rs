use std::net::SocketAddr;

use anyhow::Context;

use crate::constants::{DEFAULT_BIND_ADDRESS, DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
    /// Drop and recreate all tables on startup.
    pub reset_database: bool,
    pub max_connections: u32,
    pub otlp_endpoint: Option<String>,
    /// Keys that were not set and fell back to their defaults.
    pub defaulted: Vec<&'static str>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration. Nothing is logged here since this runs before
    /// the subscriber is installed; see [`Config::log_defaults`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut defaulted = Vec::new();
        let mut lookup = |key: &'static str| {
            let value = lookup(key);
            if value.is_none() {
                defaulted.push(key);
            }
            value
        };

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_address
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid BIND_ADDRESS {bind_address:?}"))?;

        let reset_database = match lookup("RESET_DATABASE") {
            Some(value) => value
                .parse::<bool>()
                .with_context(|| format!("invalid RESET_DATABASE {value:?}"))?,
            None => true,
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("invalid DATABASE_MAX_CONNECTIONS {value:?}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty());

        Ok(Self {
            database_url,
            bind_address,
            reset_database,
            max_connections,
            otlp_endpoint,
            defaulted,
        })
    }

    pub fn log_defaults(&self) {
        if self.defaulted.contains(&"DATABASE_URL") {
            tracing::info!("no DATABASE_URL set, defaulting to {}", self.database_url);
        }

        for key in self.defaulted.iter().filter(|key| **key != "DATABASE_URL") {
            tracing::debug!(key = %key, "using default configuration value");
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}
