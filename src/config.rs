//! Application configuration.
//!
//! Configuration is loaded from environment variables with the `SUBTRACKR`
//! prefix, using `__` to separate nested values:
//!
//! - `SUBTRACKR__STORAGE__DATA_DIR=/var/lib/subtrackr` -> `storage.data_dir`
//! - `SUBTRACKR__GATEWAY__CHARGE_SUCCESS_RATE=0.5` -> `gateway.charge_success_rate`
//!
//! Every field has a default, so an empty environment yields a working
//! configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Storage data directory must not be empty")]
    EmptyDataDir,

    #[error("Storage file name must not be empty")]
    EmptyFileName,

    #[error("Gateway success rate must be between 0.0 and 1.0")]
    RateOutOfRange,
}

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Flat-file storage locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Simulated payment gateway tuning
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Log filter directive for `tracing_subscriber`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// Where each collection's JSON file lives.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default = "default_subscriptions_file")]
    pub subscriptions_file: String,

    #[serde(default = "default_payments_file")]
    pub payments_file: String,

    #[serde(default = "default_notifications_file")]
    pub notifications_file: String,
}

/// Simulated charge approval rates.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Approval probability for a first charge attempt
    #[serde(default = "default_charge_success_rate")]
    pub charge_success_rate: f64,

    /// Approval probability for a retry attempt
    #[serde(default = "default_retry_success_rate")]
    pub retry_success_rate: f64,
}

impl AppConfig {
    /// Loads configuration from `SUBTRACKR`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value cannot be parsed into its
    /// expected type.
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("SUBTRACKR").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Semantic validation of all sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.trim().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        for name in [
            &self.users_file,
            &self.subscriptions_file,
            &self.payments_file,
            &self.notifications_file,
        ] {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyFileName);
            }
        }
        Ok(())
    }

    pub fn users_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.users_file)
    }

    pub fn subscriptions_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.subscriptions_file)
    }

    pub fn payments_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.payments_file)
    }

    pub fn notifications_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.notifications_file)
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for rate in [self.charge_success_rate, self.retry_success_rate] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ValidationError::RateOutOfRange);
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            gateway: GatewayConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            users_file: default_users_file(),
            subscriptions_file: default_subscriptions_file(),
            payments_file: default_payments_file(),
            notifications_file: default_notifications_file(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            charge_success_rate: default_charge_success_rate(),
            retry_success_rate: default_retry_success_rate(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_subscriptions_file() -> String {
    "subscriptions.json".to_string()
}

fn default_payments_file() -> String {
    "payments.json".to_string()
}

fn default_notifications_file() -> String {
    "notifications.json".to_string()
}

fn default_charge_success_rate() -> f64 {
    crate::ports::DEFAULT_CHARGE_SUCCESS_RATE
}

fn default_retry_success_rate() -> f64 {
    crate::ports::DEFAULT_RETRY_SUCCESS_RATE
}

fn default_log_filter() -> String {
    "info,subtrackr=debug".to_string()
}
