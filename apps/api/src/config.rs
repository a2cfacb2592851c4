use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Simulated payment latency.
    pub payment_delay_ms: u64,
    pub cors_permissive: bool,
    /// Sessions untouched for this long are evicted.
    pub session_idle_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            payment_delay_ms: env_or("PAYMENT_DELAY_MS", "2000")
                .parse::<u64>()
                .context("PAYMENT_DELAY_MS must be a whole number of milliseconds")?,
            cors_permissive: env_or("CORS_PERMISSIVE", "true")
                .parse::<bool>()
                .context("CORS_PERMISSIVE must be 'true' or 'false'")?,
            session_idle_ttl_secs: env_or("SESSION_IDLE_TTL_SECS", "3600")
                .parse::<u64>()
                .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            payment_delay_ms: 2000,
            cors_permissive: true,
            session_idle_ttl_secs: 3600,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
