use anyhow::{Context, Result};

/// Client configuration loaded from environment variables. Everything has
/// a local-development default; nothing is required.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the scoring/training service.
    pub api_base_url: String,
    /// Shortlist size requested when the user has not changed it.
    pub default_k: u32,
    /// Exploration rate requested when the user has not changed it.
    pub default_epsilon: f64,
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            default_k: env_or("DEFAULT_TOP_K", 5)?,
            default_epsilon: env_or("DEFAULT_EPSILON", 0.1)?,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
