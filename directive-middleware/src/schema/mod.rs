//! Schema harness: builds annotated object types from SDL and resolves single fields.
//!
//! This stands in for the schema-construction side of a GraphQL server. It does not parse or
//! execute query documents; callers resolve one field at a time with
//! [`ExecutableSchema::resolve_field`].

mod builder;
mod model;
mod sdl;
mod walk;

use std::sync::Arc;

use futures::future;
use futures::FutureExt;
use serde_json::{Map, Value};

use crate::chain::ChainSummary;
use crate::error::ResolveError;
use crate::registry::DirectiveRegistry;
use crate::resolver::{default_field_resolver, RequestContext, ResolveFuture, ResolverArgs};

pub use builder::SchemaBuilder;
pub use model::{DirectiveUse, FieldDefinition, ObjectType};

/// Object types with their installed (possibly composed) resolvers.
#[derive(Debug)]
pub struct ExecutableSchema {
    objects: Vec<ObjectType>,
    registry: Arc<DirectiveRegistry>,
    chains: ChainSummary,
}

impl ExecutableSchema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Object types in declaration order.
    pub fn objects(&self) -> &[ObjectType] {
        &self.objects
    }

    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        self.objects.iter().find(|o| o.name() == name)
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDefinition> {
        self.object(type_name)?.field(field_name)
    }

    /// Registry the schema's chains were built from.
    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Directive names per annotated field, in chain order.
    pub fn chains(&self) -> &ChainSummary {
        &self.chains
    }

    /// Calls the resolver installed on `type_name.field_name`.
    ///
    /// Unannotated fields without a user resolver use the default pass-through resolver.
    pub fn resolve_field(
        &self,
        type_name: &str,
        field_name: &str,
        parent: Value,
        args: Map<String, Value>,
        context: RequestContext,
    ) -> ResolveFuture {
        let Some(field) = self.field(type_name, field_name) else {
            return future::ready(Err(ResolveError::UnknownField(format!(
                "{}.{}",
                type_name, field_name
            ))))
            .boxed();
        };
        let resolver = field
            .resolver()
            .cloned()
            .unwrap_or_else(default_field_resolver);
        resolver(ResolverArgs::new(parent, args, context, field.resolve_info()))
    }
}
