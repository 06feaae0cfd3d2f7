//! Failures while reading or checking settings

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was present but could not be parsed into its field
    #[error("cannot read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("configuration rejected: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A setting that parsed but cannot be used.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("server port must be non-zero")]
    InvalidPort,

    #[error("cannot bind to host {0:?}")]
    InvalidHost(String),

    #[error("request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("AI base URL must start with http:// or https://")]
    InvalidAiBaseUrl,

    #[error("AI timeout must be between 1 and 300 seconds")]
    InvalidAiTimeout,

    #[error("{0} must not be empty")]
    EmptyPath(&'static str),

    /// Output would clobber the template or its backup
    #[error("output path must differ from the template and its backup")]
    OutputOverwritesTemplate,

    #[error("download name must be a plain file name without quotes or separators")]
    InvalidDownloadName,
}
