use crate::domain::LatLng;
use crate::app::DEFAULT_RENDER_WAIT;
use crate::map::DEFAULT_CENTER;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_USER_AGENT: &str = concat!("listing-map/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid socket address: {value}")]
    InvalidAddr { key: &'static str, value: String },
    #[error("{key} must be \"lat,lng\", got {value:?}")]
    InvalidPosition { key: &'static str, value: String },
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be a number of milliseconds, got {value:?}")]
    InvalidDuration { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub api_base_url: String,
    pub default_center: LatLng,
    /// `None` behaves like a user who denied location access.
    pub device_position: Option<LatLng>,
    pub user_agent: String,
    pub max_workers: usize,
    /// Upper bound on how long a page request waits for in-flight work.
    pub render_wait: Duration,
}

fn var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn position_var(key: &'static str) -> Result<Option<LatLng>, ConfigError> {
    match var(key) {
        None => Ok(None),
        Some(value) => LatLng::parse(&value)
            .map(Some)
            .ok_or(ConfigError::InvalidPosition { key, value }),
    }
}

fn millis_var(key: &'static str) -> Result<Option<Duration>, ConfigError> {
    match var(key) {
        None => Ok(None),
        Some(value) => value
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::InvalidDuration { key, value }),
    }
}

impl Config {
    /// Reads `LISTING_MAP_*` variables. `main` loads `.env` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = var("LISTING_MAP_LISTEN_ADDR").unwrap_or_else(|| "127.0.0.1:3000".into());
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr {
                key: "LISTING_MAP_LISTEN_ADDR",
                value: listen_addr.clone(),
            })?;

        let max_workers = match var("LISTING_MAP_MAX_WORKERS") {
            None => 8,
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidNumber {
                    key: "LISTING_MAP_MAX_WORKERS",
                    value,
                })?,
        };

        let render_wait =
            millis_var("LISTING_MAP_RENDER_WAIT_MS")?.unwrap_or(DEFAULT_RENDER_WAIT);

        Ok(Self {
            listen_addr,
            api_base_url: var("LISTING_MAP_API_BASE")
                .unwrap_or_else(|| "http://127.0.0.1:8080".into()),
            default_center: position_var("LISTING_MAP_CENTER")?.unwrap_or(DEFAULT_CENTER),
            device_position: position_var("LISTING_MAP_DEVICE_POSITION")?,
            user_agent: var("LISTING_MAP_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.into()),
            max_workers,
            render_wait,
        })
    }
}
