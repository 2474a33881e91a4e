//! Logging middleware that records enter/exit around the rest of a field's chain.
//!
//! Register it under any directive name (e.g. `@log`); it always continues the chain and
//! returns the downstream outcome unchanged.

use std::sync::Arc;

use async_trait::async_trait;

use crate::chain::Next;
use crate::middleware::{Around, AroundMiddleware, DirectiveMiddleware};
use crate::parameters::Parameters;
use crate::resolver::{ResolveResult, ResolverArgs};

/// Logs, at debug level, entering and leaving the chain segment below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

#[async_trait]
impl AroundMiddleware for LoggingMiddleware {
    async fn around(
        &self,
        parameters: &Parameters,
        args: ResolverArgs,
        next: Next,
    ) -> ResolveResult {
        let field = args.info().coordinate();
        tracing::debug!(field = %field, %parameters, remaining = next.remaining(), "enter");
        let result = next.run().await;
        match &result {
            Ok(_) => tracing::debug!(field = %field, "exit"),
            Err(e) => tracing::debug!(field = %field, error = %e, "exit with error"),
        }
        result
    }
}

/// [`LoggingMiddleware`] as a registrable middleware.
pub fn logging_middleware() -> Arc<dyn DirectiveMiddleware> {
    Around::new(LoggingMiddleware).into_middleware()
}
