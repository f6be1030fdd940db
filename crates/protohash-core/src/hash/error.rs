//! Hashing error types

use thiserror::Error;

/// Errors that can occur while hashing a message tree.
///
/// Hashing is deterministic: the same input and options either always
/// succeed with the same digest or always fail with the same error. No
/// partial digests are ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HashError {
    /// A well-known type whose canonical form has not been frozen
    /// (`Any`, `Struct`, `Duration`, ...) or an unrecognized
    /// `google.protobuf` type.
    #[error("unsupported well-known type: {0}")]
    UnsupportedWellKnownType(String),

    /// A supported well-known type whose reflection shape does not match
    /// expectations.
    #[error("malformed {type_name}: {reason}")]
    MalformedWellKnownType {
        type_name: String,
        reason: String,
    },

    /// Defensive check in the float normalizer; unreachable for
    /// well-formed finite inputs.
    #[error("float normalization out of range: {0}")]
    FloatOutOfRange(f64),

    /// A basic hash function name that is not one of the supported four.
    #[error("unknown basic hash function: {0}")]
    UnknownHashFunction(String),

    /// The reflection view handed to the hasher is internally
    /// inconsistent (duplicate field numbers, mismatched kinds).
    #[error("reflection error: {0}")]
    Reflection(String),
}

/// Result type for hashing operations
pub type HashResult<T> = Result<T, HashError>;
