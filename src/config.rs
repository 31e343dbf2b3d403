//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite database file, or `:memory:` for a private in-memory database
    pub database_path: String,
    /// Redis connection URL; the in-process cache is used when unset
    pub redis_url: Option<String>,
    /// Seconds between background reconciliation passes, 0 disables them
    pub sync_interval: u64,
    /// Whether to warm the cache from the store at startup
    pub warm_cache: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_PATH` - SQLite database path (default: products.db)
    /// - `REDIS_URL` - Redis URL (default: unset, in-process cache)
    /// - `SYNC_INTERVAL` - Reconciliation frequency in seconds (default: 0, disabled)
    /// - `WARM_CACHE` - Load the cache at startup (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.database_path),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            sync_interval: env::var("SYNC_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sync_interval),
            warm_cache: env::var("WARM_CACHE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.warm_cache),
        }
    }

    /// True when the database should live in memory only.
    pub fn in_memory_database(&self) -> bool {
        self.database_path == ":memory:"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_path: "products.db".to_string(),
            redis_url: None,
            sync_interval: 0,
            warm_cache: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_path, "products.db");
        assert!(config.redis_url.is_none());
        assert_eq!(config.sync_interval, 0);
        assert!(config.warm_cache);
        assert!(!config.in_memory_database());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_PATH");
        env::remove_var("REDIS_URL");
        env::remove_var("SYNC_INTERVAL");
        env::remove_var("WARM_CACHE");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_path, "products.db");
        assert!(config.redis_url.is_none());
        assert_eq!(config.sync_interval, 0);
        assert!(config.warm_cache);
    }

    #[test]
    fn test_in_memory_database() {
        let config = Config {
            database_path: ":memory:".to_string(),
            ..Config::default()
        };
        assert!(config.in_memory_database());
    }
}
