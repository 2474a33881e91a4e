//! Object types and field definitions as the schema builder sees them.

use std::fmt;

use crate::chain::{AttachmentOrder, BuildError, ChainBuilder, FieldHandle, FieldId};
use crate::parameters::Parameters;
use crate::resolver::{ResolveInfo, Resolver};

/// One directive written at a type or field, with its literal arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveUse {
    pub name: String,
    pub parameters: Parameters,
}

/// A field of an object type.
pub struct FieldDefinition {
    id: FieldId,
    name: String,
    parent_type: String,
    ty: String,
    directives: Vec<DirectiveUse>,
    resolver: Option<Resolver>,
}

impl FieldDefinition {
    pub(crate) fn new(
        id: FieldId,
        name: impl Into<String>,
        parent_type: impl Into<String>,
        ty: impl Into<String>,
        directives: Vec<DirectiveUse>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parent_type: parent_type.into(),
            ty: ty.into(),
            directives,
            resolver: None,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_type(&self) -> &str {
        &self.parent_type
    }

    /// Printed GraphQL type, e.g. `[String]`.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// `Type.field`.
    pub fn coordinate(&self) -> String {
        format!("{}.{}", self.parent_type, self.name)
    }

    /// Directives written on this field, in source order.
    pub fn directives(&self) -> &[DirectiveUse] {
        &self.directives
    }

    /// Installed resolver: the user's, the field's dispatcher once annotated, or none.
    pub fn resolver(&self) -> Option<&Resolver> {
        self.resolver.as_ref()
    }

    pub(crate) fn set_resolver(&mut self, resolver: Resolver) {
        self.resolver = Some(resolver);
    }

    /// Attaches `directive` to this field through `builder` and installs the field's
    /// dispatcher as its resolver.
    pub fn attach(
        &mut self,
        builder: &mut ChainBuilder,
        directive: &str,
        parameters: Parameters,
        order: AttachmentOrder,
    ) -> Result<(), BuildError> {
        let coordinate = self.coordinate();
        let dispatcher = builder.attach(
            FieldHandle {
                id: self.id,
                coordinate: &coordinate,
                resolver: self.resolver.as_ref(),
            },
            directive,
            parameters,
            order,
        )?;
        self.resolver = Some(dispatcher.into_resolver());
        Ok(())
    }

    pub fn resolve_info(&self) -> ResolveInfo {
        ResolveInfo {
            field_id: self.id,
            field_name: self.name.clone(),
            parent_type: self.parent_type.clone(),
            return_type: self.ty.clone(),
        }
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parent_type", &self.parent_type)
            .field("ty", &self.ty)
            .field("directives", &self.directives)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

/// An object type with its fields in declaration order.
#[derive(Debug)]
pub struct ObjectType {
    name: String,
    directives: Vec<DirectiveUse>,
    fields: Vec<FieldDefinition>,
}

impl ObjectType {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directives written on the type (including `extend type` blocks), in source order.
    pub fn directives(&self) -> &[DirectiveUse] {
        &self.directives
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [FieldDefinition] {
        &mut self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut FieldDefinition> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub(crate) fn push_directive(&mut self, directive: DirectiveUse) {
        self.directives.push(directive);
    }

    pub(crate) fn push_field(&mut self, field: FieldDefinition) {
        self.fields.push(field);
    }
}
