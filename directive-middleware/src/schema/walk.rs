//! Directive traversal: type-level pass, then field-level pass.
//!
//! Positions passed to the visitors are source order within each level, so chain order
//! comes from [`AttachmentOrder`](crate::AttachmentOrder) and not from the pass order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::chain::{AttachmentLevel, BuildError, ChainBuilder};
use crate::visitor::SchemaDirectiveVisitor;

use super::model::{DirectiveUse, ObjectType};

pub(crate) type Visitors = HashMap<String, Arc<dyn SchemaDirectiveVisitor>>;

/// Runs every installed visitor over `objects`.
///
/// Directives with no installed visitor are skipped. A directive written at a location its
/// visitor does not support fails with [`BuildError::UnsupportedLocation`].
pub(crate) fn visit_directives(
    objects: &mut [ObjectType],
    visitors: &Visitors,
    builder: &mut ChainBuilder,
) -> Result<(), BuildError> {
    declare_expected(objects, visitors, builder);

    for object in objects.iter_mut() {
        let uses: Vec<DirectiveUse> = object.directives().to_vec();
        for (position, directive) in uses.iter().enumerate() {
            let Some(visitor) = visitors.get(&directive.name) else {
                continue;
            };
            check_location(visitor.as_ref(), AttachmentLevel::Type, object.name())?;
            visitor.visit_object(builder, object, &directive.parameters, position)?;
        }
    }

    for object in objects.iter_mut() {
        for field in object.fields_mut() {
            let uses: Vec<DirectiveUse> = field.directives().to_vec();
            for (position, directive) in uses.iter().enumerate() {
                let Some(visitor) = visitors.get(&directive.name) else {
                    continue;
                };
                check_location(visitor.as_ref(), AttachmentLevel::Field, &field.coordinate())?;
                visitor.visit_field_definition(builder, field, &directive.parameters, position)?;
            }
        }
    }
    Ok(())
}

/// Every field's expected attachment count: visited type directives plus its own.
fn declare_expected(objects: &[ObjectType], visitors: &Visitors, builder: &mut ChainBuilder) {
    let visited = |uses: &[DirectiveUse]| {
        uses.iter()
            .filter(|d| visitors.contains_key(&d.name))
            .count()
    };
    for object in objects {
        let type_level = visited(object.directives());
        for field in object.fields() {
            let declared = type_level + visited(field.directives());
            if declared > 0 {
                builder.expect(field.id(), &field.coordinate(), declared);
            }
        }
    }
}

fn check_location(
    visitor: &dyn SchemaDirectiveVisitor,
    level: AttachmentLevel,
    target: &str,
) -> Result<(), BuildError> {
    if visitor.supports(level) {
        Ok(())
    } else {
        Err(BuildError::UnsupportedLocation {
            directive: visitor.name().to_string(),
            location: level.location().to_string(),
            target: target.to_string(),
        })
    }
}
