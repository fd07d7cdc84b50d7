use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failures of the fetch collaborator. None of these are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed payload: {0}")]
    Decode(String),

    #[error("company {0} does not exist")]
    NotFound(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter mode `{0}` (expected all, onlyVisible or onlyHidden)")]
pub struct ParseFilterModeError(pub String);

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, RosterError>;
