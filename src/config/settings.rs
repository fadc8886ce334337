//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_URL, DEFAULT_HASH_ITERATIONS,
    DEFAULT_HASH_MEMORY_KIB, DEFAULT_HASH_PARALLELISM,
};

/// Argon2 cost parameters.
///
/// Process-wide: read once at startup and handed to `CredentialHasher::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
            parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub hash: HashConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("hash", &self.hash)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            ),
            hash: HashConfig {
                memory_kib: parse_var("PASSWORD_HASH_MEMORY_KIB", DEFAULT_HASH_MEMORY_KIB),
                iterations: parse_var("PASSWORD_HASH_ITERATIONS", DEFAULT_HASH_ITERATIONS),
                parallelism: parse_var("PASSWORD_HASH_PARALLELISM", DEFAULT_HASH_PARALLELISM),
            },
        }
    }

    /// Configuration pointing at the given database, everything else default.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            hash: HashConfig::default(),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("{} has an unparsable value, using default", key);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_database_url() {
        let config = Config::with_database_url("postgres://admin:hunter2@db/social");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_default_hash_config() {
        let hash = HashConfig::default();
        assert_eq!(hash.memory_kib, DEFAULT_HASH_MEMORY_KIB);
        assert_eq!(hash.iterations, DEFAULT_HASH_ITERATIONS);
        assert_eq!(hash.parallelism, DEFAULT_HASH_PARALLELISM);
    }
}
