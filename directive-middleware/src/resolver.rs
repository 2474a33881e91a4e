//! Resolver functions and the argument tuple they receive.
//!
//! A [`Resolver`] is what the execution engine calls for one field: base resolvers,
//! the resolvers returned by middleware, and the composed [`Dispatcher`](crate::Dispatcher)
//! all share this one shape.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use futures::FutureExt;
use serde_json::{Map, Value};

use crate::chain::FieldId;
use crate::error::ResolveError;

pub type ResolveResult = Result<Value, ResolveError>;

/// Outcome of a resolver call: a ready value or a suspended computation.
pub type ResolveFuture = BoxFuture<'static, ResolveResult>;

/// Field resolver: `(parent, args, context, info) -> outcome`, packed into [`ResolverArgs`].
pub type Resolver = Arc<dyn Fn(ResolverArgs) -> ResolveFuture + Send + Sync>;

/// Wraps an async closure as a [`Resolver`].
///
/// ```rust
/// use directive_middleware::{resolver_fn, ResolverArgs};
/// use serde_json::json;
///
/// let list = resolver_fn(|_args: ResolverArgs| async { Ok(json!(["john", "smith"])) });
/// # let _ = list;
/// ```
pub fn resolver_fn<F, Fut>(f: F) -> Resolver
where
    F: Fn(ResolverArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ResolveResult> + Send + 'static,
{
    Arc::new(move |args| f(args).boxed())
}

/// Resolver that always yields a clone of `value`.
pub fn constant_resolver(value: Value) -> Resolver {
    Arc::new(move |_: ResolverArgs| -> ResolveFuture {
        future::ready(Ok(value.clone())).boxed()
    })
}

/// Pass-through resolver: reads the field's own value from the parent object.
///
/// Yields `null` when the parent is not an object or has no such key.
pub fn default_field_resolver() -> Resolver {
    Arc::new(|args: ResolverArgs| -> ResolveFuture {
        let value = args
            .parent()
            .get(args.info().field_name.as_str())
            .cloned()
            .unwrap_or(Value::Null);
        future::ready(Ok(value)).boxed()
    })
}

/// Shared per-request value handed to every resolver of one request.
#[derive(Clone, Default)]
pub struct RequestContext {
    data: Option<Arc<dyn Any + Send + Sync>>,
}

impl RequestContext {
    pub fn new<T: Any + Send + Sync>(data: T) -> Self {
        Self {
            data: Some(Arc::new(data)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Typed access; `None` when empty or holding another type.
    pub fn data<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.data.as_ref()?.downcast_ref::<T>()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

/// Static description of the field being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveInfo {
    pub field_id: FieldId,
    pub field_name: String,
    pub parent_type: String,
    /// Printed GraphQL type, e.g. `[String]` or `User!`.
    pub return_type: String,
}

impl ResolveInfo {
    /// `Type.field`, used in logs and error messages.
    pub fn coordinate(&self) -> String {
        format!("{}.{}", self.parent_type, self.field_name)
    }
}

struct ArgsInner {
    parent: Value,
    args: Map<String, Value>,
    context: RequestContext,
    info: ResolveInfo,
}

/// Arguments of one resolver call. Cloning shares the same tuple.
#[derive(Clone)]
pub struct ResolverArgs {
    inner: Arc<ArgsInner>,
}

impl ResolverArgs {
    pub fn new(
        parent: Value,
        args: Map<String, Value>,
        context: RequestContext,
        info: ResolveInfo,
    ) -> Self {
        Self {
            inner: Arc::new(ArgsInner {
                parent,
                args,
                context,
                info,
            }),
        }
    }

    pub fn parent(&self) -> &Value {
        &self.inner.parent
    }

    pub fn args(&self) -> &Map<String, Value> {
        &self.inner.args
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.inner.args.get(name)
    }

    pub fn context(&self) -> &RequestContext {
        &self.inner.context
    }

    pub fn info(&self) -> &ResolveInfo {
        &self.inner.info
    }
}

impl fmt::Debug for ResolverArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverArgs")
            .field("parent", &self.inner.parent)
            .field("args", &self.inner.args)
            .field("context", &self.inner.context)
            .field("info", &self.inner.info)
            .finish()
    }
}
