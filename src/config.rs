use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    /// Upper bound on the store work done for a single request.
    pub query_timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("TWEETER_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid TWEETER_HOST: {e}"))?;

        let port: u16 = env_or("TWEETER_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid TWEETER_PORT: {e}"))?;

        let max_body_size: usize = env_or("TWEETER_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid TWEETER_MAX_BODY_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("TWEETER_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid TWEETER_DB_MAX_CONNECTIONS: {e}"))?;

        let query_timeout_secs: u64 = env_or("TWEETER_QUERY_TIMEOUT_SECS", "5")
            .parse()
            .map_err(|e| format!("Invalid TWEETER_QUERY_TIMEOUT_SECS: {e}"))?;
        if query_timeout_secs == 0 {
            return Err("TWEETER_QUERY_TIMEOUT_SECS must be greater than zero".to_string());
        }

        let log_level = env_or("TWEETER_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            max_body_size,
            db_max_connections,
            query_timeout: Duration::from_secs(query_timeout_secs),
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
