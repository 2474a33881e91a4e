//! Schema and chain construction error.
//!
//! Returned while directives are registered, attached and visited, i.e. before any field is
//! resolved. A build error is fatal for the schema being built; no field falls back to a
//! pass-through resolver.

use thiserror::Error;

/// Error while building middleware chains or the schema that carries them.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A directive was attached but nothing is registered under its name.
    #[error("no middleware registered for directive @{0}")]
    UnregisteredMiddleware(String),

    /// Registration under a taken name with `DuplicatePolicy::Reject`.
    #[error("directive @{0} is already registered")]
    DuplicateRegistration(String),

    /// The directive's visitor has no hook for the location it was written at.
    #[error("directive @{directive} is not supported on {location} ({target})")]
    UnsupportedLocation {
        directive: String,
        location: String,
        target: String,
    },

    /// A resolver was supplied for an object type the SDL does not define.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A resolver was supplied for a field the SDL does not define.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A type (or one of its `extend type` blocks) defines the same field twice.
    #[error("field {0} is defined more than once")]
    DuplicateField(String),

    /// The number of attachments a field received differs from what its declaration carries.
    #[error("field {field} declares {declared} directive attachment(s) but received {attached}")]
    IncompleteChain {
        field: String,
        declared: usize,
        attached: usize,
    },

    /// The SDL could not be parsed.
    #[error("schema parse error: {0}")]
    Parse(String),

    /// Directive arguments could not be converted to parameters.
    #[error("invalid parameters for directive @{directive}: {reason}")]
    InvalidParameters { directive: String, reason: String },
}
