#![forbid(unsafe_code)]

use crate::StoreError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_DB_FILE_NAME: &str = "crm_access.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

const ENV_STORAGE_DIR: &str = "CRM_STORAGE_DIR";
const ENV_DB_FILE: &str = "CRM_DB_FILE";
const ENV_BUSY_TIMEOUT_MS: &str = "CRM_BUSY_TIMEOUT_MS";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub storage_dir: PathBuf,
    #[serde(default = "default_db_file_name")]
    pub db_file_name: String,
    /// How long a writer waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_db_file_name() -> String {
    DEFAULT_DB_FILE_NAME.to_string()
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl StoreConfig {
    pub fn new(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: storage_dir.as_ref().to_path_buf(),
            db_file_name: default_db_file_name(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }

    /// Reads `CRM_STORAGE_DIR` (required), `CRM_DB_FILE` and `CRM_BUSY_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StoreError> {
        let storage_dir = lookup(ENV_STORAGE_DIR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(StoreError::Config("CRM_STORAGE_DIR is not set"))?;
        let mut config = Self::new(PathBuf::from(storage_dir));

        if let Some(name) = lookup(ENV_DB_FILE) {
            let name = name.trim();
            if !name.is_empty() {
                config.db_file_name = name.to_string();
            }
        }
        if let Some(raw) = lookup(ENV_BUSY_TIMEOUT_MS) {
            config.busy_timeout_ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| StoreError::Config("CRM_BUSY_TIMEOUT_MS must be an integer"))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| StoreError::ConfigParse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(&self.db_file_name)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.db_file_name.trim().is_empty() {
            return Err(StoreError::Config("db_file_name must not be empty"));
        }
        if self.db_file_name.contains(['/', '\\']) {
            return Err(StoreError::Config("db_file_name must be a bare file name"));
        }
        Ok(())
    }
}
