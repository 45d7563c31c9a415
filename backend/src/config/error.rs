//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),

    #[error("Invalid CRM API domain (expected http:// or https:// URL)")]
    InvalidCrmDomain,

    #[error("CRM API domain must use HTTPS in production")]
    CrmDomainMustBeHttps,

    #[error("CRM field name for '{0}' cannot be blank")]
    BlankCrmField(&'static str),

    #[error("CRM field name '{0}' is mapped more than once")]
    DuplicateCrmField(String),
}
