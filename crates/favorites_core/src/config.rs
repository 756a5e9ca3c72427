//! Runtime configuration for core consumers.
//!
//! # Responsibility
//! - Resolve database location and logging settings from defaults and
//!   environment variables.
//!
//! # Invariants
//! - `log_level` is always a normalized level name.
//! - Paths are taken verbatim; validation happens where they are used.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "FAVORITES_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "FAVORITES_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "FAVORITES_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file path. `None` means an in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Rolling log directory. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Builds configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.set_log_level(&level)?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Overrides the log level after normalizing it.
    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        self.log_level = normalize_level(level).map_err(|message| ConfigError::InvalidValue {
            key: ENV_LOG_LEVEL,
            message,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = CoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn reads_all_keys() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "/tmp/favorites.sqlite3"),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, "/tmp/favorites-logs"),
        ]))
        .unwrap();

        assert_eq!(
            config.db_path,
            Some(PathBuf::from("/tmp/favorites.sqlite3"))
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/favorites-logs")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config =
            CoreConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "  "), (ENV_LOG_DIR, "")]))
                .unwrap();
        assert!(config.db_path.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn invalid_level_is_rejected() {
        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        let ConfigError::InvalidValue { key, message } = err;
        assert_eq!(key, ENV_LOG_LEVEL);
        assert!(message.contains("loud"));
    }
}
