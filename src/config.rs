use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/world_clock.db";
const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
const DEFAULT_DISPLAY_CAP: usize = 200;

/// Runtime settings read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string for the preference store
    pub database_url: String,
    /// Time between two redraws
    pub tick_interval: Duration,
    /// Most clocks rendered on one frame
    pub display_cap: usize,
}

impl Config {
    /// Reads `DATABASE_URL`, `TICK_INTERVAL_MS` and `DISPLAY_CAP`, falling
    /// back to defaults for unset values.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let database_url = if database_url.trim().is_empty() {
            DEFAULT_DATABASE_URL.to_string()
        } else {
            database_url
        };
        
        let tick_str = env::var("TICK_INTERVAL_MS")
            .unwrap_or_else(|_| DEFAULT_TICK_INTERVAL_MS.to_string());
        let tick_ms: u64 = tick_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid TICK_INTERVAL_MS"))?;
        if tick_ms == 0 {
            return Err(anyhow!("Invalid TICK_INTERVAL_MS: must be greater than zero"));
        }
        
        let cap_str = env::var("DISPLAY_CAP")
            .unwrap_or_else(|_| DEFAULT_DISPLAY_CAP.to_string());
        let display_cap: usize = cap_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid DISPLAY_CAP"))?;
        if display_cap == 0 {
            return Err(anyhow!("Invalid DISPLAY_CAP: must be greater than zero"));
        }
        
        Ok(Config {
            database_url,
            tick_interval: Duration::from_millis(tick_ms),
            display_cap,
        })
    }
}
