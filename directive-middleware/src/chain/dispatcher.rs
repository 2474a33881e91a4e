//! Dispatcher: the composed resolver installed on an annotated field.
//!
//! Every call snapshots the field's entry sequence and starts a fresh [`Next`] at cursor 0.
//! Cursor state lives in the continuation owned by that call, so overlapping or repeated
//! invocations of the same field never observe each other, and a failed invocation leaves
//! nothing behind for the next one.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use futures::future;
use futures::FutureExt;

use crate::error::ResolveError;
use crate::resolver::{ResolveFuture, Resolver, ResolverArgs};

use super::entry::{ChainEntry, FieldId};
use super::logging::{log_base_resolver, log_chain_exhausted, log_dispatch_start, log_step};

/// Per-field chain state shared by the builder (writes, during construction) and the
/// dispatcher (reads, at call time).
pub(crate) struct FieldChain {
    pub(crate) field: FieldId,
    pub(crate) coordinate: String,
    pub(crate) base: Resolver,
    pub(crate) verbose: bool,
    entries: RwLock<Arc<[ChainEntry]>>,
}

impl FieldChain {
    pub(crate) fn new(field: FieldId, coordinate: String, base: Resolver, verbose: bool) -> Self {
        Self {
            field,
            coordinate,
            base,
            verbose,
            entries: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Current entry sequence. Never mutated in place: attachment swaps in a new slice.
    pub(crate) fn snapshot(&self) -> Arc<[ChainEntry]> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Inserts `entry` after every entry whose order is less than or equal to its own.
    /// Returns the new chain length.
    pub(crate) fn insert(&self, entry: ChainEntry) -> usize {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<ChainEntry> = guard.iter().cloned().collect();
        let at = entries.partition_point(|existing| existing.order <= entry.order);
        entries.insert(at, entry);
        let len = entries.len();
        *guard = Arc::from(entries);
        len
    }
}

/// Composed resolver for one field: middleware entries in order, then the base resolver.
///
/// Created once per field by [`ChainBuilder::attach`](super::ChainBuilder::attach); clones
/// share the same chain.
#[derive(Clone)]
pub struct Dispatcher {
    chain: Arc<FieldChain>,
}

impl Dispatcher {
    pub(crate) fn new(chain: Arc<FieldChain>) -> Self {
        Self { chain }
    }

    pub fn field(&self) -> FieldId {
        self.chain.field
    }

    pub fn coordinate(&self) -> &str {
        &self.chain.coordinate
    }

    /// Directive names in chain order.
    pub fn directives(&self) -> Vec<String> {
        self.chain
            .snapshot()
            .iter()
            .map(|entry| entry.directive.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chain.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the chain for one call and returns whatever the first step produces.
    pub fn resolve(&self, args: ResolverArgs) -> ResolveFuture {
        let entries = self.chain.snapshot();
        log_dispatch_start(&self.chain.coordinate, entries.len(), self.chain.verbose);
        Next {
            chain: self.chain.clone(),
            entries,
            cursor: 0,
            args,
        }
        .run()
    }

    /// Resolver value to install on the field.
    pub fn into_resolver(self) -> Resolver {
        Arc::new(move |args: ResolverArgs| self.resolve(args))
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("field", &self.chain.field)
            .field("coordinate", &self.chain.coordinate)
            .field("directives", &self.directives())
            .finish()
    }
}

/// Continuation handed to a middleware: the rest of the chain for one call.
///
/// Holds the call's entry snapshot, the cursor of the next unconsumed entry and the captured
/// call arguments. `run` can be called again (e.g. to retry); each call restarts from the
/// same cursor and never skips an entry.
#[derive(Clone)]
pub struct Next {
    chain: Arc<FieldChain>,
    entries: Arc<[ChainEntry]>,
    cursor: usize,
    args: ResolverArgs,
}

impl Next {
    /// Runs the entry at the cursor, or the base resolver once all entries are consumed.
    ///
    /// Bookkeeping is synchronous; the returned future is the middleware's (or base
    /// resolver's) own outcome, forwarded unchanged.
    pub fn run(&self) -> ResolveFuture {
        let coordinate = self.chain.coordinate.as_str();
        let len = self.entries.len();
        if self.cursor == len {
            log_base_resolver(coordinate, self.chain.verbose);
            return (self.chain.base)(self.args.clone());
        }
        let Some(entry) = self.entries.get(self.cursor) else {
            log_chain_exhausted(coordinate, self.cursor, len);
            return future::ready(Err(ResolveError::ChainExhausted {
                field: self.chain.field,
                cursor: self.cursor,
                len,
            }))
            .boxed();
        };
        log_step(coordinate, self.cursor, &entry.directive, self.chain.verbose);
        let next = Next {
            chain: self.chain.clone(),
            entries: self.entries.clone(),
            cursor: self.cursor + 1,
            args: self.args.clone(),
        };
        let resolver = entry.middleware.wrap(entry.parameters.clone(), next);
        resolver(self.args.clone())
    }

    /// Arguments of the call this continuation belongs to.
    pub fn args(&self) -> &ResolverArgs {
        &self.args
    }

    /// Index of the entry `run` will execute; equals [`len`](Self::len) at the base resolver.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of middleware entries in this call's chain.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries still ahead of the cursor.
    pub fn remaining(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor)
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("field", &self.chain.coordinate)
            .field("cursor", &self.cursor)
            .field("len", &self.entries.len())
            .finish()
    }
}
