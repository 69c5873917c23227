//! Admin error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from the admin session context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// No session has been started, or it was torn down at sign-out.
    #[error("not signed in")]
    NotSignedIn,

    /// The signed-in user lacks the admin role.
    #[error("role '{0}' may not access the dashboard")]
    NotAuthorized(String),
}
