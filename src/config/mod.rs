/// Database configuration and connection management
pub mod database;

/// Clinic identity and reporting configuration from config.toml
pub mod clinic;
