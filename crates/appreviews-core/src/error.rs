use thiserror::Error;

/// Errors raised while reading [`crate::ScraperConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised while constructing a [`crate::Target`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("country code must not be empty")]
    EmptyCountry,

    #[error("name \"{0}\" produces an empty slug")]
    EmptyName(String),
}
