//! Field identity, attachment ordering and chain entries.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::middleware::DirectiveMiddleware;
use crate::parameters::Parameters;

/// Opaque identity of a field definition, assigned by the schema that owns the field.
///
/// Two fields with the same name on different types (or in different schemas built by the
/// same builder) have different ids; chain state is keyed by this, never by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Where a directive was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttachmentLevel {
    /// On the enclosing object type; applies to each of its fields.
    Type,
    /// On the field definition itself.
    Field,
}

impl AttachmentLevel {
    /// GraphQL directive location name.
    pub fn location(self) -> &'static str {
        match self {
            AttachmentLevel::Type => "OBJECT",
            AttachmentLevel::Field => "FIELD_DEFINITION",
        }
    }
}

impl fmt::Display for AttachmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.location())
    }
}

/// Position of an entry in a field's chain.
///
/// Ordered by level first (every type-level entry precedes every field-level entry), then by
/// `position`, the source order of the directive within its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttachmentOrder {
    pub level: AttachmentLevel,
    pub position: usize,
}

impl AttachmentOrder {
    pub fn type_level(position: usize) -> Self {
        Self {
            level: AttachmentLevel::Type,
            position,
        }
    }

    pub fn field_level(position: usize) -> Self {
        Self {
            level: AttachmentLevel::Field,
            position,
        }
    }
}

impl Ord for AttachmentOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level
            .cmp(&other.level)
            .then(self.position.cmp(&other.position))
    }
}

impl PartialOrd for AttachmentOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One middleware bound into a field's chain.
#[derive(Clone)]
pub struct ChainEntry {
    pub directive: String,
    pub middleware: Arc<dyn DirectiveMiddleware>,
    pub parameters: Parameters,
    pub order: AttachmentOrder,
}

impl fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainEntry")
            .field("directive", &self.directive)
            .field("parameters", &self.parameters)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
