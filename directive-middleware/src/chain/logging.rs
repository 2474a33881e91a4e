//! Logging helpers for chain construction and dispatch.
//!
//! Construction events log at debug. Dispatch events log at trace, or at debug when the
//! chain was built with `trace_dispatch` enabled. Failures raised by middleware or resolvers
//! are not logged here: they belong to the caller.

use super::entry::AttachmentOrder;

/// Log the capture of a field's base resolver (first attachment on that field).
pub fn log_base_captured(coordinate: &str, had_resolver: bool) {
    tracing::debug!(
        field = coordinate,
        default_resolver = !had_resolver,
        "Captured base resolver"
    );
}

/// Log one attachment.
pub fn log_attach(coordinate: &str, directive: &str, order: &AttachmentOrder, chain_len: usize) {
    tracing::debug!(
        field = coordinate,
        directive = directive,
        level = %order.level,
        position = order.position,
        chain_len = chain_len,
        "Attached directive middleware"
    );
}

/// Log the start of one dispatcher invocation.
pub fn log_dispatch_start(coordinate: &str, entries: usize, verbose: bool) {
    if verbose {
        tracing::debug!(field = coordinate, entries = entries, "Dispatching field");
    } else {
        tracing::trace!(field = coordinate, entries = entries, "Dispatching field");
    }
}

/// Log a step into the middleware at `cursor`.
pub fn log_step(coordinate: &str, cursor: usize, directive: &str, verbose: bool) {
    if verbose {
        tracing::debug!(field = coordinate, cursor = cursor, directive = directive, "Chain step");
    } else {
        tracing::trace!(field = coordinate, cursor = cursor, directive = directive, "Chain step");
    }
}

/// Log the hand-off to the base resolver.
pub fn log_base_resolver(coordinate: &str, verbose: bool) {
    if verbose {
        tracing::debug!(field = coordinate, "Calling base resolver");
    } else {
        tracing::trace!(field = coordinate, "Calling base resolver");
    }
}

/// Log the chain invariant violation.
pub fn log_chain_exhausted(coordinate: &str, cursor: usize, len: usize) {
    tracing::error!(
        field = coordinate,
        cursor = cursor,
        len = len,
        "Continuation ran past the end of the middleware chain"
    );
}
