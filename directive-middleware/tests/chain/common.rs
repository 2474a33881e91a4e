//! Shared helpers for chain integration tests: Calls recorder, recording middleware.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use directive_middleware::{
    middleware_fn, resolver_fn, DirectiveMiddleware, ExecutableSchema, Next, Parameters,
    RequestContext, ResolveError, Resolver,
};
use serde_json::{json, Map, Value};

/// Records `(directive, parameters)` in the order middleware ran.
#[derive(Clone, Default)]
pub struct Calls {
    inner: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Calls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, name: &str, parameters: &Parameters) {
        self.inner
            .lock()
            .unwrap()
            .push((name.to_string(), parameters.to_value()));
    }

    pub fn names(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn parameters_of(&self, name: &str) -> Vec<Value> {
        self.inner
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }
}

/// Middleware that records its name and parameters, then continues the chain.
pub fn recording(name: &'static str, calls: &Calls) -> Arc<dyn DirectiveMiddleware> {
    let calls = calls.clone();
    middleware_fn(move |parameters: Parameters, next: Next| {
        let calls = calls.clone();
        resolver_fn(move |_args| {
            calls.push(name, &parameters);
            next.run()
        })
    })
}

/// Resolver yielding `['john', 'smith']` and counting its calls.
pub fn list_resolver(counter: &Arc<AtomicUsize>) -> Resolver {
    let counter = counter.clone();
    resolver_fn(move |_args| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(json!(["john", "smith"])) }
    })
}

/// Resolves `type_name.field_name` with an empty parent and no arguments.
pub async fn resolve(
    schema: &ExecutableSchema,
    type_name: &str,
    field_name: &str,
) -> Result<Value, ResolveError> {
    schema
        .resolve_field(
            type_name,
            field_name,
            json!({}),
            Map::new(),
            RequestContext::empty(),
        )
        .await
}
