//! AroundMiddleware adapter, LoggingMiddleware and typed parameters with request context.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use directive_middleware::{
    create_visit_field_definition, create_visit_object, logging_middleware, Around,
    AroundMiddleware, ExecutableSchema, Next, Parameters, RequestContext, ResolveError,
    ResolveResult, ResolverArgs,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::common::{list_resolver, recording, resolve, Calls};

/// Around middleware that records before/after and upper-cases string lists.
struct Upper {
    events: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl AroundMiddleware for Upper {
    async fn around(&self, _parameters: &Parameters, _args: ResolverArgs, next: Next) -> ResolveResult {
        self.events.lock().unwrap().push("before".to_string());
        let value = next.run().await?;
        self.events.lock().unwrap().push("after".to_string());
        let upper = match value {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Value::String(s.to_uppercase()),
                        other => other,
                    })
                    .collect(),
            ),
            other => other,
        };
        Ok(upper)
    }
}

/// **Scenario**: An Around middleware sits in the chain like a closure middleware: it runs
/// in source order, wraps the rest of the chain and can rewrite the result.
#[tokio::test]
async fn around_wraps_rest_of_chain() {
    let calls = Calls::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let base = Arc::new(AtomicUsize::new(0));
    let upper = Around::new(Upper {
        events: events.clone(),
    })
    .into_middleware();

    let schema = ExecutableSchema::builder()
        .type_defs("type Query { list: [String] @first @upper @second }")
        .resolver("Query", "list", list_resolver(&base))
        .schema_directive(create_visit_field_definition("first", recording("first", &calls)))
        .schema_directive(create_visit_field_definition("upper", upper))
        .schema_directive(create_visit_field_definition("second", recording("second", &calls)))
        .build()
        .unwrap();

    let out = resolve(&schema, "Query", "list").await.unwrap();

    assert_eq!(out, json!(["JOHN", "SMITH"]));
    assert_eq!(calls.names(), vec!["first", "second"]);
    assert_eq!(*events.lock().unwrap(), vec!["before", "after"]);
}

#[derive(Deserialize)]
struct AuthParams {
    requires: String,
}

/// Role of the caller, carried in the request context.
struct Viewer {
    role: String,
}

/// `@auth(requires: ROLE)`: fails unless the viewer in the context has the role.
struct Auth;

#[async_trait]
impl AroundMiddleware for Auth {
    async fn around(&self, parameters: &Parameters, args: ResolverArgs, next: Next) -> ResolveResult {
        let params: AuthParams = parameters.deserialize()?;
        let allowed = args
            .context()
            .data::<Viewer>()
            .is_some_and(|viewer| viewer.role == params.requires);
        if !allowed {
            return Err(ResolveError::failed(format!(
                "not authorized: {} requires {}",
                args.info().coordinate(),
                params.requires
            )));
        }
        next.run().await
    }
}

fn auth_schema(base: &Arc<AtomicUsize>) -> ExecutableSchema {
    ExecutableSchema::builder()
        .type_defs(r#"type Query @auth(requires: "ADMIN") { list: [String] }"#)
        .resolver("Query", "list", list_resolver(base))
        .schema_directive(create_visit_object("auth", Around::new(Auth).into_middleware()))
        .build()
        .unwrap()
}

/// **Scenario**: Typed parameters and the request context drive an authorization check.
#[tokio::test]
async fn auth_uses_parameters_and_context() {
    let base = Arc::new(AtomicUsize::new(0));
    let schema = auth_schema(&base);

    let admin = schema
        .resolve_field(
            "Query",
            "list",
            json!({}),
            Map::new(),
            RequestContext::new(Viewer {
                role: "ADMIN".to_string(),
            }),
        )
        .await
        .unwrap();
    assert_eq!(admin, json!(["john", "smith"]));

    let guest = schema
        .resolve_field(
            "Query",
            "list",
            json!({}),
            Map::new(),
            RequestContext::new(Viewer {
                role: "GUEST".to_string(),
            }),
        )
        .await
        .unwrap_err();
    assert_eq!(guest.to_string(), "not authorized: Query.list requires ADMIN");

    let anonymous = schema
        .resolve_field("Query", "list", json!({}), Map::new(), RequestContext::empty())
        .await;
    assert!(anonymous.is_err());
    assert_eq!(base.load(Ordering::SeqCst), 1);
}

/// **Scenario**: Parameters that do not match the typed shape fail the call, not the build.
#[tokio::test]
async fn mistyped_parameters_fail_the_call() {
    let base = Arc::new(AtomicUsize::new(0));
    let schema = ExecutableSchema::builder()
        .type_defs("type Query @auth(requires: 3) { list: [String] }")
        .resolver("Query", "list", list_resolver(&base))
        .schema_directive(create_visit_object("auth", Around::new(Auth).into_middleware()))
        .build()
        .unwrap();

    let err = resolve(&schema, "Query", "list").await.unwrap_err();
    assert!(matches!(err, ResolveError::Source(_)));
    assert_eq!(base.load(Ordering::SeqCst), 0);
}

/// **Scenario**: LoggingMiddleware continues the chain and returns its value unchanged.
#[tokio::test]
async fn logging_middleware_is_transparent() {
    let calls = Calls::new();
    let base = Arc::new(AtomicUsize::new(0));
    let schema = ExecutableSchema::builder()
        .type_defs(r#"type Query { list: [String] @log(tag: "list") @first }"#)
        .resolver("Query", "list", list_resolver(&base))
        .schema_directive(create_visit_field_definition("log", logging_middleware()))
        .schema_directive(create_visit_field_definition("first", recording("first", &calls)))
        .build()
        .unwrap();

    assert_eq!(resolve(&schema, "Query", "list").await.unwrap(), json!(["john", "smith"]));
    assert_eq!(calls.names(), vec!["first"]);
    assert_eq!(base.load(Ordering::SeqCst), 1);
}
