//! Annotation visitors: the adapter between schema traversal and the chain builder.
//!
//! A visitor carries one directive name and its middleware. The schema builder registers the
//! middleware when the visitor is installed, then calls the hook matching each location the
//! directive is written at:
//!
//! - [`visit_object`](SchemaDirectiveVisitor::visit_object): once per type carrying the
//!   directive; attaches to every field of the type at type level.
//! - [`visit_field_definition`](SchemaDirectiveVisitor::visit_field_definition): once per
//!   field carrying the directive; attaches at field level.

use std::sync::Arc;

use crate::chain::{AttachmentLevel, AttachmentOrder, BuildError, ChainBuilder};
use crate::middleware::DirectiveMiddleware;
use crate::parameters::Parameters;
use crate::schema::{FieldDefinition, ObjectType};

/// Traversal hooks for one directive.
///
/// Both hooks default to [`BuildError::UnsupportedLocation`]; implement the ones matching
/// [`locations`](Self::locations).
pub trait SchemaDirectiveVisitor: Send + Sync {
    /// Directive name, without `@`.
    fn name(&self) -> &str;

    fn middleware(&self) -> Arc<dyn DirectiveMiddleware>;

    /// Locations this visitor has a hook for.
    fn locations(&self) -> &[AttachmentLevel];

    fn supports(&self, level: AttachmentLevel) -> bool {
        self.locations().contains(&level)
    }

    /// Called for a type carrying the directive; `position` is the directive's index among
    /// the type's directives.
    fn visit_object(
        &self,
        _builder: &mut ChainBuilder,
        object: &mut ObjectType,
        _parameters: &Parameters,
        _position: usize,
    ) -> Result<(), BuildError> {
        Err(BuildError::UnsupportedLocation {
            directive: self.name().to_string(),
            location: AttachmentLevel::Type.location().to_string(),
            target: object.name().to_string(),
        })
    }

    /// Called for a field carrying the directive; `position` is the directive's index among
    /// the field's directives.
    fn visit_field_definition(
        &self,
        _builder: &mut ChainBuilder,
        field: &mut FieldDefinition,
        _parameters: &Parameters,
        _position: usize,
    ) -> Result<(), BuildError> {
        Err(BuildError::UnsupportedLocation {
            directive: self.name().to_string(),
            location: AttachmentLevel::Field.location().to_string(),
            target: field.coordinate(),
        })
    }
}

/// Visitor for a directive written on field definitions.
pub struct FieldDirectiveVisitor {
    name: String,
    middleware: Arc<dyn DirectiveMiddleware>,
}

impl SchemaDirectiveVisitor for FieldDirectiveVisitor {
    fn name(&self) -> &str {
        &self.name
    }

    fn middleware(&self) -> Arc<dyn DirectiveMiddleware> {
        self.middleware.clone()
    }

    fn locations(&self) -> &[AttachmentLevel] {
        &[AttachmentLevel::Field]
    }

    fn visit_field_definition(
        &self,
        builder: &mut ChainBuilder,
        field: &mut FieldDefinition,
        parameters: &Parameters,
        position: usize,
    ) -> Result<(), BuildError> {
        field.attach(
            builder,
            &self.name,
            parameters.clone(),
            AttachmentOrder::field_level(position),
        )
    }
}

/// Visitor for a directive written on object types; wraps every field of the type.
pub struct ObjectDirectiveVisitor {
    name: String,
    middleware: Arc<dyn DirectiveMiddleware>,
}

impl SchemaDirectiveVisitor for ObjectDirectiveVisitor {
    fn name(&self) -> &str {
        &self.name
    }

    fn middleware(&self) -> Arc<dyn DirectiveMiddleware> {
        self.middleware.clone()
    }

    fn locations(&self) -> &[AttachmentLevel] {
        &[AttachmentLevel::Type]
    }

    fn visit_object(
        &self,
        builder: &mut ChainBuilder,
        object: &mut ObjectType,
        parameters: &Parameters,
        position: usize,
    ) -> Result<(), BuildError> {
        for field in object.fields_mut() {
            field.attach(
                builder,
                &self.name,
                parameters.clone(),
                AttachmentOrder::type_level(position),
            )?;
        }
        Ok(())
    }
}

/// Visitor attaching `middleware` wherever `@name` is written on a field definition.
///
/// ```rust
/// use directive_middleware::{create_visit_field_definition, middleware_fn, resolver_fn, Next, Parameters};
///
/// let upper = create_visit_field_definition("upper", middleware_fn(|_p: Parameters, next: Next| {
///     resolver_fn(move |_args| {
///         let next = next.clone();
///         async move {
///             next.run().await.map(|value| match value.as_str() {
///                 Some(s) => s.to_uppercase().into(),
///                 None => value,
///             })
///         }
///     })
/// }));
/// # let _ = upper;
/// ```
pub fn create_visit_field_definition(
    name: impl Into<String>,
    middleware: Arc<dyn DirectiveMiddleware>,
) -> FieldDirectiveVisitor {
    FieldDirectiveVisitor {
        name: name.into(),
        middleware,
    }
}

/// Visitor attaching `middleware` to every field of each type carrying `@name`.
pub fn create_visit_object(
    name: impl Into<String>,
    middleware: Arc<dyn DirectiveMiddleware>,
) -> ObjectDirectiveVisitor {
    ObjectDirectiveVisitor {
        name: name.into(),
        middleware,
    }
}
