//! Directive middleware: the behaviour registered under a directive name.
//!
//! Two equivalent ways to write one:
//! - [`DirectiveMiddleware::wrap`]: `(parameters, next) -> resolver`; closures with that
//!   signature implement the trait (see [`middleware_fn`]).
//! - [`AroundMiddleware::around`]: an async hook that receives the call arguments and the
//!   continuation directly; adapt it with [`Around`].

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use crate::chain::Next;
use crate::parameters::Parameters;
use crate::resolver::{ResolveResult, Resolver, ResolverArgs};

/// Middleware bound to a directive name in a [`DirectiveRegistry`](crate::DirectiveRegistry).
///
/// `wrap` is called once per chain step with the parameters written at the directive's use
/// site and the continuation to the rest of the chain. The returned resolver is called
/// immediately with the field's arguments. Returning without calling `next.run()` ends the
/// chain: later middleware and the base resolver never run. Calling `next.run()` again
/// re-runs the rest of the chain from the same step, so a middleware can retry it.
pub trait DirectiveMiddleware: Send + Sync {
    fn wrap(&self, parameters: Parameters, next: Next) -> Resolver;
}

impl<F> DirectiveMiddleware for F
where
    F: Fn(Parameters, Next) -> Resolver + Send + Sync,
{
    fn wrap(&self, parameters: Parameters, next: Next) -> Resolver {
        self(parameters, next)
    }
}

/// Boxes a `(parameters, next) -> resolver` closure as a shared middleware.
///
/// ```rust
/// use directive_middleware::{middleware_fn, resolver_fn, Next, Parameters};
///
/// let passthrough = middleware_fn(|_params: Parameters, next: Next| {
///     resolver_fn(move |_args| next.run())
/// });
/// # let _ = passthrough;
/// ```
pub fn middleware_fn<F>(f: F) -> Arc<dyn DirectiveMiddleware>
where
    F: Fn(Parameters, Next) -> Resolver + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Async middleware that wraps the rest of the chain (around pattern).
///
/// Can run logic before and after `next.run()`, replace its result, or skip it entirely.
#[async_trait]
pub trait AroundMiddleware: Send + Sync {
    /// - `parameters`: literal arguments of the directive use site
    /// - `args`: the field's call arguments (parent, field args, context, info)
    /// - `next`: continuation; `next.run()` executes the remaining entries and the base resolver
    async fn around(&self, parameters: &Parameters, args: ResolverArgs, next: Next)
        -> ResolveResult;
}

/// Adapts an [`AroundMiddleware`] into a [`DirectiveMiddleware`].
pub struct Around<M> {
    inner: Arc<M>,
}

impl<M> Around<M>
where
    M: AroundMiddleware + 'static,
{
    pub fn new(inner: M) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn shared(inner: Arc<M>) -> Self {
        Self { inner }
    }

    pub fn into_middleware(self) -> Arc<dyn DirectiveMiddleware> {
        Arc::new(self)
    }
}

impl<M> DirectiveMiddleware for Around<M>
where
    M: AroundMiddleware + 'static,
{
    fn wrap(&self, parameters: Parameters, next: Next) -> Resolver {
        let inner = self.inner.clone();
        Arc::new(move |args| {
            let inner = inner.clone();
            let parameters = parameters.clone();
            let next = next.clone();
            async move { inner.around(&parameters, args, next).await }.boxed()
        })
    }
}
