//! Error types for compiling key paths and applying them to value trees.

use thiserror::Error;

/// A key path that does not match the accepted grammar.
///
/// The message quotes the part of the path that could not be translated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid key: {remainder:?}")]
    InvalidKey { remainder: String },

    #[error("invalid key: {remainder:?}: index {digits} is too large")]
    IndexTooLarge { remainder: String, digits: String },
}

/// Failure while walking a value tree along a compiled key path.
///
/// `path` is the key path up to and including the step that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("{path}: no field {field} for type {type_name}")]
    NoSuchField {
        path: String,
        field: String,
        type_name: String,
    },

    #[error("{path}: expected {expected}, got {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{path}: array index too large: {index} >= {len}")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },

    /// Growing a sequence to `index` would exceed `limit` elements.
    #[error("{path}: array index too large: {index} exceeds growth limit {limit}")]
    GrowthLimit {
        path: String,
        index: usize,
        limit: usize,
    },

    #[error("{path}: cannot parse {value:?} as {expected}")]
    Parse {
        path: String,
        value: String,
        expected: &'static str,
    },

    #[error("{path}: don't know how to set value of type {found}")]
    UnsupportedTarget { path: String, found: String },
}

impl ApplyError {
    /// The rendered key path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            ApplyError::NoSuchField { path, .. }
            | ApplyError::TypeMismatch { path, .. }
            | ApplyError::IndexOutOfRange { path, .. }
            | ApplyError::GrowthLimit { path, .. }
            | ApplyError::Parse { path, .. }
            | ApplyError::UnsupportedTarget { path, .. } => path,
        }
    }
}

/// Either half of an overwrite: compiling the key or applying it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Apply(#[from] ApplyError),
}
