//! Chain builder: accumulates directive attachments per field during schema construction.
//!
//! Per-field state lives in a side table keyed by [`FieldId`]; the field object itself only
//! receives the returned [`Dispatcher`] as its new resolver. The first attachment on a field
//! captures its base resolver (or the default pass-through resolver) and creates the
//! dispatcher; later attachments insert into the same chain, so the dispatcher sees them.
//!
//! # Ordering
//!
//! Entries are kept sorted by [`AttachmentOrder`]: all type-level entries first, then all
//! field-level entries, each group in source order. Callers supply the order explicitly, so
//! the result does not depend on whether the type pass or the field pass runs first.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::parameters::Parameters;
use crate::registry::DirectiveRegistry;
use crate::resolver::{default_field_resolver, Resolver};

use super::build_error::BuildError;
use super::dispatcher::{Dispatcher, FieldChain};
use super::entry::{AttachmentOrder, ChainEntry, FieldId};
use super::logging::{log_attach, log_base_captured};

/// The field an attachment targets.
#[derive(Clone, Copy)]
pub struct FieldHandle<'a> {
    pub id: FieldId,
    /// `Type.field`, for logs and errors.
    pub coordinate: &'a str,
    /// The field's resolver at the time of the call; only read on the first attachment.
    pub resolver: Option<&'a Resolver>,
}

struct FieldChainState {
    chain: Arc<FieldChain>,
    dispatcher: Dispatcher,
    attached: usize,
}

struct Declared {
    coordinate: String,
    count: usize,
}

/// Builds one composed resolver per annotated field.
pub struct ChainBuilder {
    registry: Arc<DirectiveRegistry>,
    fields: HashMap<FieldId, FieldChainState>,
    declared: HashMap<FieldId, Declared>,
    verbose: bool,
}

impl ChainBuilder {
    pub fn new(registry: Arc<DirectiveRegistry>) -> Self {
        Self {
            registry,
            fields: HashMap::new(),
            declared: HashMap::new(),
            verbose: false,
        }
    }

    /// Log dispatch steps at debug instead of trace for every chain built here.
    pub fn with_verbose_dispatch(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }

    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Records how many attachments the field's declaration carries; checked by [`finish`](Self::finish).
    pub fn expect(&mut self, field: FieldId, coordinate: &str, count: usize) {
        self.declared.insert(
            field,
            Declared {
                coordinate: coordinate.to_string(),
                count,
            },
        );
    }

    /// Attaches the middleware registered as `directive` to `field` and returns the field's
    /// dispatcher (the same one for every attachment on that field).
    ///
    /// Fails with [`BuildError::UnregisteredMiddleware`] before touching any state when the
    /// name is not registered.
    pub fn attach(
        &mut self,
        field: FieldHandle<'_>,
        directive: &str,
        parameters: Parameters,
        order: AttachmentOrder,
    ) -> Result<Dispatcher, BuildError> {
        let middleware = self.registry.lookup(directive)?;
        let verbose = self.verbose;

        let state = self.fields.entry(field.id).or_insert_with(|| {
            log_base_captured(field.coordinate, field.resolver.is_some());
            let base = field
                .resolver
                .cloned()
                .unwrap_or_else(default_field_resolver);
            let chain = Arc::new(FieldChain::new(
                field.id,
                field.coordinate.to_string(),
                base,
                verbose,
            ));
            FieldChainState {
                dispatcher: Dispatcher::new(chain.clone()),
                chain,
                attached: 0,
            }
        });

        let len = state.chain.insert(ChainEntry {
            directive: directive.to_string(),
            middleware,
            parameters,
            order,
        });
        state.attached += 1;
        log_attach(field.coordinate, directive, &order, len);

        Ok(state.dispatcher.clone())
    }

    /// Dispatcher of a field that has at least one attachment.
    pub fn dispatcher(&self, field: FieldId) -> Option<Dispatcher> {
        self.fields.get(&field).map(|state| state.dispatcher.clone())
    }

    /// Ends construction. Every field passed to [`expect`](Self::expect) must have received
    /// exactly its declared number of attachments.
    pub fn finish(self) -> Result<ChainSummary, BuildError> {
        let mut declared: Vec<(&FieldId, &Declared)> = self.declared.iter().collect();
        declared.sort_by_key(|(id, _)| **id);
        for (id, declared) in declared {
            let attached = self.fields.get(id).map_or(0, |state| state.attached);
            if attached != declared.count {
                return Err(BuildError::IncompleteChain {
                    field: declared.coordinate.clone(),
                    declared: declared.count,
                    attached,
                });
            }
        }

        let chains = self
            .fields
            .values()
            .map(|state| {
                let names = state
                    .chain
                    .snapshot()
                    .iter()
                    .map(|entry| entry.directive.clone())
                    .collect();
                (state.chain.coordinate.clone(), names)
            })
            .collect();
        Ok(ChainSummary { chains })
    }
}

/// Directive names per annotated field, in chain order, as built.
///
/// Keyed by `Type.field`; schema reading rejects a field defined twice on one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainSummary {
    chains: BTreeMap<String, Vec<String>>,
}

impl ChainSummary {
    pub fn directives(&self, coordinate: &str) -> Option<&[String]> {
        self.chains.get(coordinate).map(Vec::as_slice)
    }

    /// Number of annotated fields.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.chains
            .iter()
            .map(|(coordinate, names)| (coordinate.as_str(), names.as_slice()))
    }
}
