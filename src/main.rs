// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use canopy::events::{DispatcherOptions, EventChain, EventDispatcher, Handler};
use canopy::tree::{filter, find_path, flatten, list_to_tree, Extract, ListToTreeOptions};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("🌳 canopy demo");
    println!("═══════════════");
    println!();

    tree_demo();
    println!();
    events_demo();
}

fn tree_demo() {
    println!("── Tree transforms ──");

    let records = vec![
        json!({ "id": 1, "pid": 0, "name": "drinks" }),
        json!({ "id": 2, "pid": 0, "name": "snacks" }),
        json!({ "id": 3, "pid": 1, "name": "coffee" }),
        json!({ "id": 4, "pid": 1, "name": "tea" }),
        json!({ "id": 5, "pid": 3, "name": "espresso" }),
    ];

    let tree = list_to_tree(&records, &ListToTreeOptions::default());
    println!("Built tree: {}", tree);

    let ids = flatten(&tree, Extract::func(|node| node["id"].clone()));
    println!("Pre-order ids: {:?}", ids);

    let path = find_path(
        &tree,
        |node, _| node["name"] == json!("espresso"),
        Extract::fields("name"),
    );
    println!("Path to espresso: {}", Value::Array(path));

    let no_tea = filter(&tree, |node, _| node["name"] != json!("tea"));
    println!("Without tea: {}", no_tea);
}

fn events_demo() {
    println!("── Event dispatch ──");

    let log = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&log);
    let mut bus = EventDispatcher::with_options(DispatcherOptions::default())
        .with_monitor(move |channel, args| {
            sink.borrow_mut()
                .push(format!("monitor saw '{}' with {:?}", channel, args));
        });

    bus.on(
        "brew",
        Handler::new(|_cx, args| {
            println!("Brewing {}...", args[0]);
            Ok(Value::Null)
        }),
        false,
    );
    bus.on(
        "brew",
        Handler::new(|_cx, args| {
            println!("Grinding beans for {} (priority)", args[0]);
            Ok(Value::Null)
        }),
        true,
    );

    if let Err(e) = bus.emit("brew", &[json!("espresso")]) {
        eprintln!("dispatch failed: {}", e);
    }
    for line in log.borrow().iter() {
        println!("{}", line);
    }

    let mut chain = EventChain::new();
    chain
        .then(Handler::new(|_cx, args| {
            Ok(json!(args[0].as_i64().unwrap_or(0) * 2))
        }))
        .then(Handler::new(|_cx, args| {
            println!("Chained result: {}", args[0]);
            Ok(Value::Null)
        }));
    if let Err(e) = chain.emit(&[json!(21)]) {
        eprintln!("chain failed: {}", e);
    }
}
