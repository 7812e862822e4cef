//! Bottom sheet error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading sheet configuration
///
/// Runtime operations (`show`, `close`, gesture handling) never fail.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Config file could not be read
    #[error("Failed to read sheet config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text was not valid TOML or had invalid values
    #[error("Invalid sheet config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for sheet configuration
pub type Result<T> = std::result::Result<T, SheetError>;
