use thiserror::Error;

/// Errors returned by metadata lookups (stat or directory listing).
///
/// Lookups are never fatal: the cache does not store them and the traversal
/// queries treat a failed node as contributing nothing.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Path (or the target of a symbolic link) does not exist
    #[error("not found")]
    NotFound,
    /// A listing was requested for something that is not a directory
    #[error("not a directory")]
    NotADirectory,
    /// Permission denied
    #[error("access denied")]
    AccessDenied,
    /// Any other I/O failure
    #[error("io error: {0}")]
    Other(#[source] std::io::Error),
}

impl LookupError {
    /// Short stable label, used in trace events.
    pub fn kind_str(&self) -> &'static str {
        match self {
            LookupError::NotFound => "not_found",
            LookupError::NotADirectory => "not_a_directory",
            LookupError::AccessDenied => "access_denied",
            LookupError::Other(_) => "other",
        }
    }
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => LookupError::NotFound,
            ErrorKind::NotADirectory => LookupError::NotADirectory,
            ErrorKind::PermissionDenied => LookupError::AccessDenied,
            _ => LookupError::Other(err),
        }
    }
}

/// Errors returned when building a [`PathKey`](crate::PathKey) from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathKeyError {
    /// Empty input
    #[error("empty path")]
    Empty,
    /// Input does not start at the root separator
    #[error("path is not absolute: {0}")]
    Relative(String),
}
