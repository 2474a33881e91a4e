//! Middleware chains: per-field construction and per-call dispatch.
//!
//! [`ChainBuilder`] collects attachments while the schema is built and hands back one
//! [`Dispatcher`] per annotated field. At call time the dispatcher walks the chain through a
//! fresh [`Next`] continuation, from the first entry to the field's base resolver.
//!
//! # Main types
//!
//! - [`ChainBuilder`]: `attach`, `expect`, `finish` -> [`ChainSummary`].
//! - [`Dispatcher`]: composed resolver for one field.
//! - [`Next`]: continuation passed to each middleware.
//! - [`FieldId`], [`AttachmentOrder`], [`AttachmentLevel`]: identity and ordering.
//! - [`BuildError`]: construction failures.

mod build_error;
mod builder;
mod dispatcher;
mod entry;
mod logging;

pub use build_error::BuildError;
pub use builder::{ChainBuilder, ChainSummary, FieldHandle};
pub use dispatcher::{Dispatcher, Next};
pub use entry::{AttachmentLevel, AttachmentOrder, ChainEntry, FieldId};
pub use logging::{
    log_attach, log_base_captured, log_base_resolver, log_chain_exhausted, log_dispatch_start,
    log_step,
};
