use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub list_stale_secs: u64,
    pub prospects_stale_secs: u64,
    pub analytics_stale_secs: u64,
    pub analytics_refresh_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            request_timeout_secs: get_env_parse_or("REQUEST_TIMEOUT_SECS", 60)?,
            list_stale_secs: get_env_parse_or("LIST_STALE_SECS", 5 * 60)?,
            prospects_stale_secs: get_env_parse_or("PROSPECTS_STALE_SECS", 60)?,
            analytics_stale_secs: get_env_parse_or("ANALYTICS_STALE_SECS", 30 * 60)?,
            analytics_refresh_secs: get_env_parse_or("ANALYTICS_REFRESH_SECS", 30 * 60)?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
