//! Resolver invocation error types.
//!
//! Returned by every [`Resolver`](crate::Resolver): the base resolver, middleware resolvers
//! and the composed [`Dispatcher`](crate::Dispatcher). The dispatcher forwards these values
//! untouched; it never wraps, retries or logs a failure raised by user code.

use thiserror::Error;

use crate::chain::FieldId;

/// Failure of one field resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A middleware or resolver failed with a message (e.g. "not authorized").
    #[error("{0}")]
    Failed(String),

    /// A foreign error raised by a middleware or resolver, kept as the source.
    #[error(transparent)]
    Source(Box<dyn std::error::Error + Send + Sync>),

    /// The schema has no field at the requested coordinate.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Internal invariant: a continuation pointed past the base resolver.
    #[error("middleware chain for field {field:?} exhausted at cursor {cursor} of {len} entries without reaching the base resolver")]
    ChainExhausted {
        field: FieldId,
        cursor: usize,
        len: usize,
    },
}

impl ResolveError {
    pub fn failed(message: impl Into<String>) -> Self {
        ResolveError::Failed(message.into())
    }

    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ResolveError::Source(Box::new(error))
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(error: serde_json::Error) -> Self {
        ResolveError::from_error(error)
    }
}
