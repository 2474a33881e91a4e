//! Schema builder: SDL, resolvers and directive visitors in; executable schema out.

use std::sync::Arc;

use crate::chain::{BuildError, ChainBuilder};
use crate::config::DirectivesConfig;
use crate::registry::DirectiveRegistry;
use crate::resolver::Resolver;
use crate::visitor::SchemaDirectiveVisitor;

use super::sdl::read_object_types;
use super::walk::{visit_directives, Visitors};
use super::ExecutableSchema;

/// Collects type definitions, resolvers and visitors; [`build`](Self::build) wires the chains.
///
/// ```rust
/// use directive_middleware::{create_visit_field_definition, logging_middleware, ExecutableSchema};
///
/// let schema = ExecutableSchema::builder()
///     .type_defs("type Query { hello: String @log }")
///     .schema_directive(create_visit_field_definition("log", logging_middleware()))
///     .build()
///     .unwrap();
/// assert_eq!(schema.chains().directives("Query.hello").map(|d| d.len()), Some(1));
/// ```
#[derive(Default)]
pub struct SchemaBuilder {
    type_defs: Vec<String>,
    resolvers: Vec<(String, String, Resolver)>,
    visitors: Vec<Arc<dyn SchemaDirectiveVisitor>>,
    config: DirectivesConfig,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds SDL; may be called more than once (documents are concatenated in call order).
    pub fn type_defs(mut self, sdl: impl Into<String>) -> Self {
        self.type_defs.push(sdl.into());
        self
    }

    /// Base resolver for `type_name.field_name`. Fields without one use the default
    /// pass-through resolver.
    pub fn resolver(
        mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        resolver: Resolver,
    ) -> Self {
        self.resolvers
            .push((type_name.into(), field_name.into(), resolver));
        self
    }

    /// Installs a directive visitor; its middleware is registered under its name at build time.
    pub fn schema_directive<V>(self, visitor: V) -> Self
    where
        V: SchemaDirectiveVisitor + 'static,
    {
        self.schema_directive_shared(Arc::new(visitor))
    }

    pub fn schema_directive_shared(mut self, visitor: Arc<dyn SchemaDirectiveVisitor>) -> Self {
        self.visitors.push(visitor);
        self
    }

    pub fn with_config(self, config: DirectivesConfig) -> Self {
        Self { config, ..self }
    }

    /// Parses the SDL, installs resolvers, registers and runs the visitors, then checks that
    /// every annotated field received all of its attachments.
    pub fn build(self) -> Result<ExecutableSchema, BuildError> {
        let sdl = self.type_defs.join("\n");
        let mut next_id = 0;
        let mut objects = read_object_types(&sdl, &mut next_id)?;

        for (type_name, field_name, resolver) in self.resolvers {
            let object = objects
                .iter_mut()
                .find(|o| o.name() == type_name)
                .ok_or_else(|| BuildError::UnknownType(type_name.clone()))?;
            let field = object
                .field_mut(&field_name)
                .ok_or_else(|| BuildError::UnknownField(format!("{}.{}", type_name, field_name)))?;
            field.set_resolver(resolver);
        }

        let mut registry = DirectiveRegistry::with_policy(self.config.duplicate_registration);
        let mut visitors = Visitors::new();
        for visitor in self.visitors {
            registry.register(visitor.name(), visitor.middleware())?;
            visitors.insert(visitor.name().to_string(), visitor);
        }
        let registry = Arc::new(registry);

        let mut builder =
            ChainBuilder::new(registry.clone()).with_verbose_dispatch(self.config.trace_dispatch);
        visit_directives(&mut objects, &visitors, &mut builder)?;
        let chains = builder.finish()?;

        tracing::debug!(
            types = objects.len(),
            fields = next_id,
            annotated = chains.len(),
            directives = ?registry.names(),
            "Built schema"
        );

        Ok(ExecutableSchema {
            objects,
            registry,
            chains,
        })
    }
}
