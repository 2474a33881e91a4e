//! Example: call order of type-level and field-level directives.
//!
//! `@first` on the type runs before `@second` on the field; the base resolver runs last.
//! Pass `fake` to make `@first` short-circuit with `['fake']`.
//!
//! Run: `RUST_LOG=directive_middleware=debug cargo run -p directive-middleware-examples --example chain_order -- [fake]`

use std::env;
use std::sync::{Arc, Mutex};

use directive_middleware::{
    create_visit_field_definition, create_visit_object, middleware_fn, resolver_fn,
    DirectiveMiddleware, DirectivesConfig, ExecutableSchema, Next, Parameters, RequestContext,
};
use serde_json::{json, Map};

type Log = Arc<Mutex<Vec<String>>>;

fn announce(name: &'static str, log: &Log, short_circuit: bool) -> Arc<dyn DirectiveMiddleware> {
    let log = log.clone();
    middleware_fn(move |parameters: Parameters, next: Next| {
        let log = log.clone();
        resolver_fn(move |_args| {
            if let Ok(mut log) = log.lock() {
                log.push(format!("{name}({parameters})"));
            }
            let next = next.clone();
            async move {
                if short_circuit {
                    Ok(json!(["fake"]))
                } else {
                    next.run().await
                }
            }
        })
    })
}

#[tokio::main]
async fn main() {
    config::init_tracing("warn");
    let short_circuit = env::args().nth(1).as_deref() == Some("fake");

    let directives = match DirectivesConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config: {}", e);
            DirectivesConfig::default()
        }
    };

    let log: Log = Arc::default();
    let schema = ExecutableSchema::builder()
        .type_defs(
            r#"
            type Query @first(name: "a param") {
                list: [String] @second(name: "an other param")
            }
            "#,
        )
        .resolver(
            "Query",
            "list",
            resolver_fn(|_args| async { Ok(json!(["john", "smith"])) }),
        )
        .schema_directive(create_visit_object("first", announce("first", &log, short_circuit)))
        .schema_directive(create_visit_field_definition("second", announce("second", &log, false)))
        .with_config(directives)
        .build();
    let schema = match schema {
        Ok(s) => s,
        Err(e) => {
            eprintln!("build: {}", e);
            std::process::exit(1);
        }
    };

    for (field, names) in schema.chains().iter() {
        println!("{} <- {}", field, names.join(" -> "));
    }

    match schema
        .resolve_field("Query", "list", json!({}), Map::new(), RequestContext::empty())
        .await
    {
        Ok(value) => println!("list = {}", value),
        Err(e) => eprintln!("error: {}", e),
    }
    if let Ok(log) = log.lock() {
        println!("calls: {}", log.join(", "));
    };
}
