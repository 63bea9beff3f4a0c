//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | DATABASE_PATH | oryx.db | SQLite database file |
//! | HTTP_PORT | 3000 | HTTP service port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_LEVEL | info | base log level when RUST_LOG is unset |
//! | LOG_DIR | (none) | enables daily-rolling file logging |

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file
    pub database_path: String,
    /// HTTP API service port
    pub http_port: u16,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Base log level
    pub log_level: String,
    /// Log directory; when set, logs also go to a daily-rolling file
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "oryx.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
