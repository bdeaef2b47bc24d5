//! Common error types for the map gallery

use thiserror::Error;

/// Common result type for gallery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the gallery engine and its hosts
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset fetch over HTTP failed (wraps reqwest::Error)
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Dataset server answered with a non-success status
    #[error("Fetch of {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dataset may only be loaded once per session
    #[error("Dataset already loaded")]
    AlreadyLoaded,

    /// Display surface has no mount points to render into
    #[error("Display surface is not mounted")]
    MissingMount,

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Why a change to the active filters was refused
///
/// The active set is left untouched in both cases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Filters exist only once the dataset is loaded
    #[error("Dataset not loaded")]
    NotLoaded,

    /// Label is not part of the filter vocabulary
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),
}
