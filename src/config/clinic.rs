//! Clinic configuration loading from config.toml
//!
//! Holds the clinic identity printed on documents and the reporting cutoff
//! hour that defines where one business day ends and the next begins.

use crate::core::render::ClinicHeader;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Clinic identity for printed documents
    pub clinic: ClinicConfig,
    /// Reporting settings
    #[serde(default)]
    pub reports: ReportsConfig,
}

/// Clinic identity block
#[derive(Debug, Deserialize, Clone)]
pub struct ClinicConfig {
    /// Clinic name as printed on documents
    pub name: String,
    /// Street address
    pub address: String,
    /// Phone number
    pub phone: String,
    /// Email address
    pub email: String,
}

/// Reporting settings block
#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    /// Hour of day (0-23) at which a new business day starts
    #[serde(default = "default_cutoff_hour")]
    pub cutoff_hour: u32,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            cutoff_hour: default_cutoff_hour(),
        }
    }
}

const fn default_cutoff_hour() -> u32 {
    0
}

impl ClinicConfig {
    /// The header block handed to the render payload.
    #[must_use]
    pub fn header(&self) -> ClinicHeader {
        ClinicHeader {
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if config.reports.cutoff_hour > 23 {
        return Err(Error::Config {
            message: format!(
                "cutoff_hour must be 0-23, got {}",
                config.reports.cutoff_hour
            ),
        });
    }

    Ok(config)
}

/// Loads configuration from the default location (./config.toml).
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
