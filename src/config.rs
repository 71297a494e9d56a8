//! Minimal runtime configuration helpers.
//! Defaults: London coordinates, a `Weather.sqlite3` file in the working
//! directory, port 5000 on localhost.

use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "Weather.sqlite3";
pub const DEFAULT_LATITUDE: f64 = 51.5074;
pub const DEFAULT_LONGITUDE: f64 = 0.1278;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path, shared by the collector and the dashboard.
    pub database_url: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Upper bound on the single weather API request.
    pub request_timeout: Duration,
    /// Dashboard listen address.
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let latitude = parse_var("WEATHER_LATITUDE", DEFAULT_LATITUDE)?;
        let longitude = parse_var("WEATHER_LONGITUDE", DEFAULT_LONGITUDE)?;
        let timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(s) if !s.trim().is_empty() => s
                .trim()
                .parse::<SocketAddr>()
                .map_err(|_| "BIND_ADDR must be a host:port address".to_string())?,
            _ => DEFAULT_BIND_ADDR
                .parse()
                .expect("default bind address is well-formed"),
        };

        Ok(Config {
            database_url,
            latitude,
            longitude,
            request_timeout: Duration::from_secs(timeout_secs),
            bind_addr,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match std::env::var(name) {
        Ok(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} has an unparseable value", name)),
        _ => Ok(default),
    }
}
