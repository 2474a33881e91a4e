//! SDL reading: object types, fields and directive uses, via `async-graphql-parser`.
//!
//! `extend type` blocks are merged into the type they extend; their directives and fields
//! follow the base definition's in source order. Directive arguments omitted at a use site
//! take the default from the matching `directive @name(...)` declaration. A field name may
//! appear only once per type, extensions included.

use std::collections::HashMap;

use async_graphql_parser::types::{
    ConstDirective, DirectiveDefinition, TypeKind, TypeSystemDefinition,
};
use async_graphql_parser::Positioned;
use async_graphql_value::ConstValue;
use serde_json::{Map, Value};

use crate::chain::{BuildError, FieldId};
use crate::parameters::Parameters;

use super::model::{DirectiveUse, FieldDefinition, ObjectType};

/// Declared argument defaults per directive name.
type DirectiveDefaults = HashMap<String, Vec<(String, ConstValue)>>;

/// Parses `sdl` into object types in declaration order, assigning field ids from `next_id`.
pub(crate) fn read_object_types(
    sdl: &str,
    next_id: &mut usize,
) -> Result<Vec<ObjectType>, BuildError> {
    let document =
        async_graphql_parser::parse_schema(sdl).map_err(|e| BuildError::Parse(e.to_string()))?;

    let defaults: DirectiveDefaults = document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            TypeSystemDefinition::Directive(directive) => Some(directive_defaults(&directive.node)),
            _ => None,
        })
        .collect();

    let mut objects: Vec<ObjectType> = Vec::new();
    for definition in &document.definitions {
        let TypeSystemDefinition::Type(ty) = definition else {
            continue;
        };
        let TypeKind::Object(object) = &ty.node.kind else {
            continue;
        };
        let type_name = ty.node.name.node.as_str();

        let index = match objects.iter().position(|o| o.name() == type_name) {
            Some(index) => index,
            None => {
                objects.push(ObjectType::new(type_name));
                objects.len() - 1
            }
        };
        let target = &mut objects[index];

        for directive in &ty.node.directives {
            target.push_directive(directive_use(directive, &defaults)?);
        }
        for field in &object.fields {
            let field = &field.node;
            if target.field(field.name.node.as_str()).is_some() {
                return Err(BuildError::DuplicateField(format!(
                    "{}.{}",
                    type_name, field.name.node
                )));
            }
            let directives = field
                .directives
                .iter()
                .map(|d| directive_use(d, &defaults))
                .collect::<Result<Vec<_>, _>>()?;
            target.push_field(FieldDefinition::new(
                FieldId::new(*next_id),
                field.name.node.as_str(),
                type_name,
                field.ty.node.to_string(),
                directives,
            ));
            *next_id += 1;
        }
    }
    Ok(objects)
}

fn directive_defaults(definition: &DirectiveDefinition) -> (String, Vec<(String, ConstValue)>) {
    let defaults = definition
        .arguments
        .iter()
        .filter_map(|argument| {
            let argument = &argument.node;
            argument
                .default_value
                .as_ref()
                .map(|value| (argument.name.node.to_string(), value.node.clone()))
        })
        .collect();
    (definition.name.node.to_string(), defaults)
}

fn directive_use(
    directive: &Positioned<ConstDirective>,
    defaults: &DirectiveDefaults,
) -> Result<DirectiveUse, BuildError> {
    let name = directive.node.name.node.to_string();
    let mut values = Map::new();
    for (arg_name, arg_value) in &directive.node.arguments {
        values.insert(arg_name.node.to_string(), to_json(&name, arg_value.node.clone())?);
    }
    if let Some(declared) = defaults.get(&name) {
        for (arg_name, default) in declared {
            if !values.contains_key(arg_name) {
                values.insert(arg_name.clone(), to_json(&name, default.clone())?);
            }
        }
    }
    Ok(DirectiveUse {
        name,
        parameters: Parameters::new(values),
    })
}

fn to_json(directive: &str, value: ConstValue) -> Result<Value, BuildError> {
    value
        .into_json()
        .map_err(|e| BuildError::InvalidParameters {
            directive: directive.to_string(),
            reason: e.to_string(),
        })
}
