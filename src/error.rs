//! Error types.
//!
//! A [`ShapeError`] means two buffers that have to share a dimension do not. It is a wiring
//! mistake, so nothing in the crate tries to recover from it: the error is returned at the first
//! boundary where the mismatch becomes visible.

use thiserror::Error;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Two vectors expected to have the same dimension do not.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("shape mismatch at {at}: expected dimension {expected}, got {got}")]
pub struct ShapeError {
    pub at: &'static str,
    pub expected: usize,
    pub got: usize,
}

impl ShapeError {
    /// Returns `Ok(())` when `got == expected`.
    pub fn check(at: &'static str, expected: usize, got: usize) -> std::result::Result<(), Self> {
        if expected == got {
            Ok(())
        } else {
            Err(Self { at, expected, got })
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// A traversal was requested before any node was added.
    #[error("network has no nodes")]
    EmptyNetwork,

    /// A node was added that does not read the network's current output port.
    #[error("node {index} is not wired to the network's output port")]
    Unwired { index: usize },

    #[error("invalid training config: {0}")]
    Config(String),

    #[error("cannot parse training config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The shape mismatch behind this error, if that is what it is.
    pub fn as_shape(&self) -> Option<&ShapeError> {
        match self {
            Error::Shape(e) => Some(e),
            _ => None,
        }
    }
}
