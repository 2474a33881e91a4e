//! Build-time behaviour: unregistered names, unsupported locations, duplicate registration,
//! declared defaults and directives without a visitor.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use directive_middleware::{
    create_visit_field_definition, create_visit_object, middleware_fn, resolver_fn,
    AttachmentLevel, AttachmentOrder, BuildError, ChainBuilder, DirectiveMiddleware,
    DirectiveRegistry, DirectivesConfig, DuplicatePolicy, ExecutableSchema, FieldDefinition,
    FieldHandle, FieldId, Next, Parameters, SchemaDirectiveVisitor,
};
use serde_json::json;

use crate::common::{list_resolver, recording, resolve, Calls};

/// **Scenario**: Attaching a name nobody registered fails instead of passing through.
#[test]
fn unregistered_directive_fails_at_attach() {
    let mut builder = ChainBuilder::new(Arc::new(DirectiveRegistry::new()));
    let err = builder
        .attach(
            FieldHandle {
                id: FieldId::new(0),
                coordinate: "Query.list",
                resolver: None,
            },
            "auth",
            Parameters::default(),
            AttachmentOrder::field_level(0),
        )
        .unwrap_err();
    assert!(matches!(err, BuildError::UnregisteredMiddleware(ref n) if n == "auth"));
}

/// Visitor registered as `alias` that attaches under a name it never registered.
struct MisnamedVisitor {
    middleware: Arc<dyn DirectiveMiddleware>,
}

impl SchemaDirectiveVisitor for MisnamedVisitor {
    fn name(&self) -> &str {
        "alias"
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
            "unregistered",
            parameters.clone(),
            AttachmentOrder::field_level(position),
        )
    }
}

/// **Scenario**: An unregistered lookup during the schema walk fails the whole build.
#[test]
fn unregistered_lookup_fails_build() {
    let calls = Calls::new();
    let err = ExecutableSchema::builder()
        .type_defs("type Query { list: [String] @alias }")
        .schema_directive(MisnamedVisitor {
            middleware: recording("alias", &calls),
        })
        .build()
        .unwrap_err();
    assert!(matches!(err, BuildError::UnregisteredMiddleware(ref n) if n == "unregistered"));
}

/// Visitor that accepts the field location but never attaches.
struct SilentVisitor;

impl SchemaDirectiveVisitor for SilentVisitor {
    fn name(&self) -> &str {
        "silent"
    }

    fn middleware(&self) -> Arc<dyn DirectiveMiddleware> {
        middleware_fn(|_p: Parameters, next: Next| resolver_fn(move |_args| next.run()))
    }

    fn locations(&self) -> &[AttachmentLevel] {
        &[AttachmentLevel::Field]
    }

    fn visit_field_definition(
        &self,
        _builder: &mut ChainBuilder,
        _field: &mut FieldDefinition,
        _parameters: &Parameters,
        _position: usize,
    ) -> Result<(), BuildError> {
        Ok(())
    }
}

/// **Scenario**: A field whose declared directives were not all attached fails the build.
#[test]
fn missing_attachment_is_incomplete_chain() {
    let err = ExecutableSchema::builder()
        .type_defs("type Query { list: [String] @silent }")
        .schema_directive(SilentVisitor)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::IncompleteChain { ref field, declared: 1, attached: 0 } if field == "Query.list"
    ));
}

/// **Scenario**: A field-only directive written on a type fails with UnsupportedLocation.
#[test]
fn field_directive_on_type_is_unsupported() {
    let calls = Calls::new();
    let err = ExecutableSchema::builder()
        .type_defs("type Query @first { list: [String] }")
        .schema_directive(create_visit_field_definition("first", recording("first", &calls)))
        .build()
        .unwrap_err();
    match err {
        BuildError::UnsupportedLocation {
            directive,
            location,
            target,
        } => {
            assert_eq!(directive, "first");
            assert_eq!(location, "OBJECT");
            assert_eq!(target, "Query");
        }
        other => panic!("expected UnsupportedLocation, got {other:?}"),
    }
}

/// **Scenario**: A type-only directive written on a field fails with UnsupportedLocation.
#[test]
fn type_directive_on_field_is_unsupported() {
    let calls = Calls::new();
    let err = ExecutableSchema::builder()
        .type_defs("type Query { list: [String] @first }")
        .schema_directive(create_visit_object("first", recording("first", &calls)))
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnsupportedLocation { ref location, ref target, .. }
            if location == "FIELD_DEFINITION" && target == "Query.list"
    ));
}

/// **Scenario**: Directives without an installed visitor are left alone.
#[tokio::test]
async fn directive_without_visitor_is_ignored() {
    let base = Arc::new(AtomicUsize::new(0));
    let schema = ExecutableSchema::builder()
        .type_defs(r#"type Query { list: [String] @deprecated(reason: "old") }"#)
        .resolver("Query", "list", list_resolver(&base))
        .build()
        .unwrap();

    assert!(schema.chains().is_empty());
    assert_eq!(resolve(&schema, "Query", "list").await.unwrap(), json!(["john", "smith"]));
    assert_eq!(base.load(Ordering::SeqCst), 1);
}

fn constant(value: &'static str) -> Arc<dyn DirectiveMiddleware> {
    middleware_fn(move |_p: Parameters, _next: Next| {
        resolver_fn(move |_args| async move { Ok(json!(value)) })
    })
}

/// **Scenario**: Two visitors with one name under the default policy: the last one wins.
#[tokio::test]
async fn duplicate_name_last_registration_wins() {
    let schema = ExecutableSchema::builder()
        .type_defs("type Query { list: [String] @pick }")
        .schema_directive(create_visit_field_definition("pick", constant("one")))
        .schema_directive(create_visit_field_definition("pick", constant("two")))
        .build()
        .unwrap();

    assert_eq!(schema.registry().len(), 1);
    assert_eq!(resolve(&schema, "Query", "list").await.unwrap(), json!("two"));
}

/// **Scenario**: Warn policy behaves like overwrite.
#[tokio::test]
async fn duplicate_name_warn_policy_overwrites() {
    let schema = ExecutableSchema::builder()
        .type_defs("type Query { list: [String] @pick }")
        .with_config(DirectivesConfig::default().with_duplicate_registration(DuplicatePolicy::Warn))
        .schema_directive(create_visit_field_definition("pick", constant("one")))
        .schema_directive(create_visit_field_definition("pick", constant("two")))
        .build()
        .unwrap();

    assert_eq!(resolve(&schema, "Query", "list").await.unwrap(), json!("two"));
}

/// **Scenario**: Reject policy fails the build on a second registration of one name.
#[test]
fn duplicate_name_reject_policy_fails() {
    let err = ExecutableSchema::builder()
        .type_defs("type Query { list: [String] @pick }")
        .with_config(DirectivesConfig::default().with_duplicate_registration(DuplicatePolicy::Reject))
        .schema_directive(create_visit_field_definition("pick", constant("one")))
        .schema_directive(create_visit_field_definition("pick", constant("two")))
        .build()
        .unwrap_err();
    assert!(matches!(err, BuildError::DuplicateRegistration(ref n) if n == "pick"));
}

/// **Scenario**: Arguments omitted at the use site take the declared default value.
#[tokio::test]
async fn declared_default_reaches_middleware() {
    let calls = Calls::new();
    let base = Arc::new(AtomicUsize::new(0));
    let schema = ExecutableSchema::builder()
        .type_defs(
            r#"
            directive @first(name: String = "default name", level: Int = 1) on FIELD_DEFINITION
            type Query { list: [String] @first(level: 3) }
            "#,
        )
        .resolver("Query", "list", list_resolver(&base))
        .schema_directive(create_visit_field_definition("first", recording("first", &calls)))
        .build()
        .unwrap();

    resolve(&schema, "Query", "list").await.unwrap();

    assert_eq!(
        calls.parameters_of("first"),
        vec![json!({ "name": "default name", "level": 3 })]
    );
}

/// **Scenario**: Malformed SDL surfaces as BuildError::Parse.
#[test]
fn malformed_sdl_is_parse_error() {
    let err = ExecutableSchema::builder()
        .type_defs("type Query { list: [String] @first(name: ) }")
        .build()
        .unwrap_err();
    assert!(matches!(err, BuildError::Parse(_)));
}

/// **Scenario**: An `extend type` block redefining a field fails the build, so one
/// coordinate never names two chains.
#[test]
fn redefined_field_fails_build() {
    let calls = Calls::new();
    let err = ExecutableSchema::builder()
        .type_defs("type Query { a: String @first }\nextend type Query { a: Int @first }")
        .schema_directive(create_visit_field_definition("first", recording("first", &calls)))
        .build()
        .unwrap_err();
    assert!(matches!(err, BuildError::DuplicateField(ref f) if f == "Query.a"));
}
