use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};

/// Default maximum connections for the pool.
/// Kept low; each request holds at most two connections at once.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.todoctl/.env
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy never overwrites variables that are already set
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.todoctl)");
    }
}

/// Get the todoctl config directory path (~/.todoctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".todoctl"))
}

/// TOML configuration (`~/.todoctl/config.toml`, `./todoctl.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoctlConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub max_connections: Option<u32>,
}

impl TodoctlConfig {
    /// Load config from TOML files
    ///
    /// Priority order (highest to lowest):
    /// 1. ./todoctl.toml
    /// 2. ~/.todoctl/config.toml
    /// 3. Built-in defaults
    ///
    /// Unreadable or malformed files are logged and skipped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(global) = config_dir().map(|d| d.join("config.toml")) {
            if global.exists() {
                match Self::from_path(&global) {
                    Ok(loaded) => config = loaded,
                    Err(e) => warn!("Skipping {}: {}", global.display(), e),
                }
            }
        }

        let local = PathBuf::from("todoctl.toml");
        if local.exists() {
            match Self::from_path(&local) {
                Ok(loaded) => config = config.merge(loaded),
                Err(e) => warn!("Skipping {}: {}", local.display(), e),
            }
        }

        config
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StoreError::config(format!("failed to read {}: {}", path.display(), e)))?;
        let config = toml::from_str(&contents)
            .map_err(|e| StoreError::config(format!("failed to parse {}: {}", path.display(), e)))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Overlay values that are set in `overlay` on top of `self`.
    fn merge(self, overlay: Self) -> Self {
        Self {
            database: DatabaseConfig {
                url: overlay.database.url.or(self.database.url),
                max_connections: overlay
                    .database
                    .max_connections
                    .or(self.database.max_connections),
            },
        }
    }

    /// Connection string, with `override_url` (flag or `DATABASE_URL`)
    /// taking precedence over the files.
    pub fn database_url(&self, override_url: Option<&str>) -> Result<String> {
        override_url
            .map(str::to_owned)
            .or_else(|| self.database.url.clone())
            .ok_or_else(|| {
                StoreError::config(
                    "no database URL: set DATABASE_URL or [database] url in todoctl.toml",
                )
            })
    }

    pub fn max_connections(&self) -> u32 {
        self.database
            .max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_dir_returns_path() {
        if let Some(path) = config_dir() {
            assert!(path.ends_with(".todoctl"));
        }
    }

    #[test]
    fn test_defaults() {
        let config = TodoctlConfig::default();
        assert_eq!(config.max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert!(config.database_url(None).is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"postgres://localhost/todos\"\nmax_connections = 12"
        )
        .unwrap();

        let config = TodoctlConfig::from_path(file.path()).unwrap();
        assert_eq!(config.database_url(None).unwrap(), "postgres://localhost/todos");
        assert_eq!(config.max_connections(), 12);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[database\nurl = ").unwrap();

        let err = TodoctlConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Config { .. }));
    }

    #[test]
    fn test_override_wins() {
        let config = TodoctlConfig {
            database: DatabaseConfig {
                url: Some("postgres://file/db".to_owned()),
                max_connections: None,
            },
        };
        assert_eq!(
            config.database_url(Some("postgres://env/db")).unwrap(),
            "postgres://env/db"
        );
    }

    #[test]
    fn test_merge_keeps_unset_values() {
        let global = TodoctlConfig {
            database: DatabaseConfig {
                url: Some("postgres://global/db".to_owned()),
                max_connections: Some(8),
            },
        };
        let local = TodoctlConfig {
            database: DatabaseConfig {
                url: None,
                max_connections: Some(2),
            },
        };

        let merged = global.merge(local);
        assert_eq!(merged.database_url(None).unwrap(), "postgres://global/db");
        assert_eq!(merged.max_connections(), 2);
    }

    #[test]
    fn test_load_dotenv_doesnt_panic() {
        load_dotenv();
    }
}
