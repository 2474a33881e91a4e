//! # directive-middleware
//!
//! Directive-driven middleware for GraphQL field resolvers. A directive written in the schema
//! (`@auth`, `@cache(ttl: 60)`, ...) names a middleware; every field carrying it gets a
//! composed resolver that runs the middleware chain and then the field's own resolver.
//!
//! ## Design principles
//!
//! - **One shape for everything**: base resolvers, middleware-produced resolvers and the
//!   composed [`Dispatcher`] are all a [`Resolver`] (`ResolverArgs -> future of Result`).
//! - **Explicit ordering**: each attachment carries an [`AttachmentOrder`]; type-level
//!   directives always run before field-level ones, each in source order.
//! - **Per-call continuation**: every call gets its own [`Next`]; overlapping or failed calls
//!   never affect one another.
//! - **Scoped registry**: a [`DirectiveRegistry`] belongs to one schema build.
//!
//! ## Main modules
//!
//! - [`resolver`]: [`Resolver`], [`ResolverArgs`], [`RequestContext`], [`ResolveInfo`],
//!   [`resolver_fn`], [`default_field_resolver`].
//! - [`middleware`]: [`DirectiveMiddleware`], [`middleware_fn`], [`AroundMiddleware`], [`Around`].
//! - [`registry`]: [`DirectiveRegistry`].
//! - [`chain`]: [`ChainBuilder`], [`Dispatcher`], [`Next`], [`FieldId`], [`BuildError`].
//! - [`visitor`]: [`SchemaDirectiveVisitor`], [`create_visit_field_definition`],
//!   [`create_visit_object`].
//! - [`schema`]: [`ExecutableSchema`], [`SchemaBuilder`]: SDL in, annotated fields out.
//! - [`config`]: [`DirectivesConfig`], [`DuplicatePolicy`].
//!
//! ## Quick start
//!
//! ```rust
//! use directive_middleware::{
//!     create_visit_field_definition, middleware_fn, resolver_fn, ExecutableSchema, Next,
//!     Parameters, RequestContext,
//! };
//! use serde_json::{json, Map};
//!
//! let fake = middleware_fn(|_params: Parameters, _next: Next| {
//!     resolver_fn(|_args| async { Ok(json!(["fake"])) })
//! });
//!
//! let schema = ExecutableSchema::builder()
//!     .type_defs("type Query { list: [String] @fake }")
//!     .resolver("Query", "list", resolver_fn(|_args| async { Ok(json!(["john"])) }))
//!     .schema_directive(create_visit_field_definition("fake", fake))
//!     .build()
//!     .unwrap();
//!
//! let list = futures::executor::block_on(schema.resolve_field(
//!     "Query",
//!     "list",
//!     json!({}),
//!     Map::new(),
//!     RequestContext::empty(),
//! ));
//! assert_eq!(list.unwrap(), json!(["fake"]));
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod logging_middleware;
pub mod middleware;
pub mod parameters;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod visitor;

pub use chain::{
    AttachmentLevel, AttachmentOrder, BuildError, ChainBuilder, ChainEntry, ChainSummary,
    Dispatcher, FieldHandle, FieldId, Next,
};
pub use config::{DirectivesConfig, DuplicatePolicy};
pub use error::ResolveError;
pub use logging_middleware::{logging_middleware, LoggingMiddleware};
pub use middleware::{middleware_fn, Around, AroundMiddleware, DirectiveMiddleware};
pub use parameters::Parameters;
pub use registry::DirectiveRegistry;
pub use resolver::{
    constant_resolver, default_field_resolver, resolver_fn, RequestContext, ResolveFuture,
    ResolveInfo, ResolveResult, Resolver, ResolverArgs,
};
pub use schema::{DirectiveUse, ExecutableSchema, FieldDefinition, ObjectType, SchemaBuilder};
pub use visitor::{
    create_visit_field_definition, create_visit_object, FieldDirectiveVisitor,
    ObjectDirectiveVisitor, SchemaDirectiveVisitor,
};
