//! Error types for registry construction, lookup, and configuration loading.

use std::path::PathBuf;

/// Failures raised by the status registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Strict lookup of a status that has no descriptor.
    #[error("status {0:?} is not present in the registry")]
    UnknownStatus(String),
    #[error("status {0:?} is registered more than once")]
    DuplicateStatus(String),
    #[error("status {0:?} has an empty label")]
    EmptyLabel(String),
    /// An override names a slug the registry does not know.
    #[error("override refers to unknown status slug {0:?}")]
    UnknownSlug(String),
}

/// Failures raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}
