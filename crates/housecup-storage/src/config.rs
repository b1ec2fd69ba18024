// Store configuration
// Decision: the store path is passed explicitly, never read from a global

use std::path::{Path, PathBuf};

const DEFAULT_PATH: &str = "housecup.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where and how to open the SQLite store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite database file, created if missing
    pub path: PathBuf,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Load from `DATABASE_PATH` and `DATABASE_MAX_CONNECTIONS`
    pub fn from_env() -> Self {
        let path = std::env::var("DATABASE_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Self {
            path: PathBuf::from(path),
            max_connections,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_pool_size() {
        let config = StoreConfig::new("/tmp/points.db");
        assert_eq!(config.path(), Path::new("/tmp/points.db"));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_default_path() {
        let config = StoreConfig::default();
        assert_eq!(config.path(), Path::new(DEFAULT_PATH));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }
}
