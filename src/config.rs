use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub observer: ObserverConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObserverConfig {
    /// Minimum milliseconds between scoreboard renders. Presentation-layer
    /// tuning only; snapshots are queued, never dropped.
    pub refresh_ms: u64,
}

impl ObserverConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

impl Config {
    /// Every setting has a default, so an empty environment yields a runnable
    /// server on 0.0.0.0:5000.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()?;
        let refresh_ms: u64 = env::var("OBSERVER_REFRESH_MS")
            .unwrap_or_else(|_| "100".to_string())
            .parse()?;

        Ok(Config {
            server: ServerConfig { host, port },
            observer: ObserverConfig { refresh_ms },
        })
    }
}
