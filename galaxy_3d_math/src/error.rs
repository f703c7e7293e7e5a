//! Error types for the Galaxy3D math crate
//!
//! This module defines the errors reported by the checked operations:
//! matrix decomposition and frustum derivation. Unchecked twins of the
//! frustum operations never produce these; they return Inf/NaN instead.

use std::fmt;

/// Result type for Galaxy3D math operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D math errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The matrix cannot be split into scale, shear, rotation and
    /// translation (zero scale, singular or non-finite linear block)
    DecompositionFailed(String),

    /// Frustum parameters (or an argument) outside the operation's domain
    Domain(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DecompositionFailed(msg) => write!(f, "Decomposition failed: {}", msg),
            Error::Domain(msg) => write!(f, "Domain error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
