//! Database configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Connection/pool configuration for the reverse-lookup SQL store.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file (`:memory:` for an in-process store).
    pub path: PathBuf,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Connection timeout.
    pub connection_timeout: Duration,

    /// Enable WAL mode for better concurrent read performance.
    pub enable_wal: bool,

    /// Cache size in pages (negative = KB).
    pub cache_size: i32,

    /// Enable foreign key constraints.
    pub foreign_keys: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: 4,
            connection_timeout: Duration::from_secs(30),
            enable_wal: true,
            cache_size: -32000, // 32MB
            foreign_keys: true,
        }
    }
}

impl DbConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// An in-memory database configuration (for testing).
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            max_connections: 1, // in-memory only works with a single connection
            enable_wal: false,  // WAL is not supported for in-memory databases
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, count: u32) -> Self {
        self.max_connections = count;
        self
    }

    pub fn with_cache_size_mb(mut self, mb: i32) -> Self {
        self.cache_size = -mb * 1000;
        self
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("opentrep")
        .join("opentrep.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DbConfig::default();
        assert!(config.enable_wal);
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn test_in_memory_config() {
        let config = DbConfig::in_memory();
        assert_eq!(config.path.to_str(), Some(":memory:"));
        assert_eq!(config.max_connections, 1);
        assert!(!config.enable_wal);
    }

    #[test]
    fn test_builder_pattern() {
        let config = DbConfig::default()
            .with_max_connections(8)
            .with_cache_size_mb(128);

        assert_eq!(config.max_connections, 8);
        assert_eq!(config.cache_size, -128000);
    }
}
