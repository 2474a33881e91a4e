//! Example: `@auth(requires: ROLE)` as an around middleware reading the request context.
//!
//! Resolves `Query.secret` as the role given on the command line (default `GUEST`).
//!
//! Run: `cargo run -p directive-middleware-examples --example auth_directive -- ADMIN`

use std::env;

use async_trait::async_trait;
use directive_middleware::{
    create_visit_field_definition, logging_middleware, resolver_fn, Around, AroundMiddleware,
    DirectivesConfig, ExecutableSchema, Next, Parameters, RequestContext, ResolveError,
    ResolveResult, ResolverArgs,
};
use serde::Deserialize;
use serde_json::{json, Map};

#[derive(Deserialize)]
struct AuthParams {
    requires: String,
}

struct Viewer {
    role: String,
}

struct Auth;

#[async_trait]
impl AroundMiddleware for Auth {
    async fn around(&self, parameters: &Parameters, args: ResolverArgs, next: Next) -> ResolveResult {
        let params: AuthParams = parameters.deserialize()?;
        let role = args.context().data::<Viewer>().map(|v| v.role.as_str());
        if role != Some(params.requires.as_str()) {
            tracing::info!(field = %args.info().coordinate(), ?role, "denied");
            return Err(ResolveError::failed(format!(
                "{} requires role {}",
                args.info().coordinate(),
                params.requires
            )));
        }
        next.run().await
    }
}

#[tokio::main]
async fn main() {
    config::init_tracing("info");
    let role = env::args().nth(1).unwrap_or_else(|| "GUEST".to_string());

    let directives = DirectivesConfig::load().unwrap_or_else(|e| {
        eprintln!("config: {}", e);
        DirectivesConfig::default()
    });

    let schema = ExecutableSchema::builder()
        .type_defs(
            r#"
            directive @auth(requires: String = "ADMIN") on FIELD_DEFINITION
            directive @log on FIELD_DEFINITION
            type Query {
                greeting: String
                secret: String @log @auth
            }
            "#,
        )
        .resolver(
            "Query",
            "secret",
            resolver_fn(|_args| async { Ok(json!("the cake is a lie")) }),
        )
        .schema_directive(create_visit_field_definition("auth", Around::new(Auth).into_middleware()))
        .schema_directive(create_visit_field_definition("log", logging_middleware()))
        .with_config(directives)
        .build();
    let schema = match schema {
        Ok(s) => s,
        Err(e) => {
            eprintln!("build: {}", e);
            std::process::exit(1);
        }
    };

    let context = RequestContext::new(Viewer { role: role.clone() });
    let parent = json!({ "greeting": format!("hello, {}", role) });
    for field in ["greeting", "secret"] {
        match schema
            .resolve_field("Query", field, parent.clone(), Map::new(), context.clone())
            .await
        {
            Ok(value) => println!("{} = {}", field, value),
            Err(e) => println!("{} failed: {}", field, e),
        }
    }
}
