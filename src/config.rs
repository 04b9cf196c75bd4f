use std::env;
use std::path::PathBuf;

use crate::application::order_store::{DEFAULT_DATE_FORMAT, DEFAULT_STORAGE_KEY};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub date_format: String,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File,
            data_dir: PathBuf::from("./data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            currency: "S/".to_string(),
        }
    }
}

impl Config {
    /// Read `LAUNDRY_*` variables from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let storage = match lookup("LAUNDRY_STORAGE").as_deref().map(str::trim) {
            None | Some("") | Some("file") => StorageBackend::File,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "LAUNDRY_STORAGE must be 'file' or 'memory', got '{}'",
                    other
                )))
            }
        };

        let storage_key = lookup("LAUNDRY_STORAGE_KEY").unwrap_or(defaults.storage_key);
        if storage_key.trim().is_empty() {
            return Err(AppError::Config(
                "LAUNDRY_STORAGE_KEY must not be empty".to_string(),
            ));
        }

        Ok(Self {
            storage,
            data_dir: lookup("LAUNDRY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage_key,
            date_format: lookup("LAUNDRY_DATE_FORMAT").unwrap_or(defaults.date_format),
            currency: lookup("LAUNDRY_CURRENCY").unwrap_or(defaults.currency),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("LAUNDRY_STORAGE", "memory"),
            ("LAUNDRY_DATA_DIR", "/var/lib/laundry"),
            ("LAUNDRY_STORAGE_KEY", "branch-2"),
            ("LAUNDRY_DATE_FORMAT", "%d/%m/%Y"),
            ("LAUNDRY_CURRENCY", "$"),
        ])
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/laundry"));
        assert_eq!(config.storage_key, "branch-2");
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.currency, "$");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(matches!(
            config_from(&[("LAUNDRY_STORAGE", "redis")]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        assert!(matches!(
            config_from(&[("LAUNDRY_STORAGE_KEY", "  ")]),
            Err(AppError::Config(_))
        ));
    }
}
