// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Depth-first tree walk with pre-order replacement and post-order
//! filtering/replacement.
//!
//! Nodes are JSON objects whose children (when present) live under a
//! configurable key, default `"children"`, holding an array. The walk is
//! a pure function: the input tree is never mutated, and the output
//! mirrors the input shape (array in, array out; single node in, single
//! node out).
//!
//! # Per-node algorithm
//!
//! 1. `each_before(node, ancestors)` may return a replacement node; the
//!    walk continues with it (`new_node`), else with the original.
//! 2. If the *original* node has a children array, those children are
//!    walked recursively with `ancestors + [new_node]`. When `each_before`
//!    produced a genuinely new node carrying its own children array, those
//!    "extra children" are spliced before (default) or after the processed
//!    originals, controlled by `extra_children_insert_after`. The merged
//!    list is assigned onto `new_node`.
//! 3. `each_after(new_node, ancestors)` returns a [`Verdict`]:
//!    [`Verdict::Drop`] removes the node (and thus its whole subtree) from
//!    the output, [`Verdict::Keep`] keeps `new_node`, and
//!    [`Verdict::Replace`] substitutes a final node. A replacement without
//!    a children field inherits the children already computed in step 2.
//!
//! Ancestor chains always hold the replacement nodes (post-`each_before`,
//! pre-children), outermost first, and are rebuilt per recursion branch —
//! sibling branches never observe each other's chain.
//!
//! # Example
//!
//! ```rust
//! use canopy::tree::{walk, WalkOptions};
//! use serde_json::json;
//!
//! let tree = json!([{ "id": 1, "children": [{ "id": 2 }] }]);
//! let doubled = walk(
//!     &tree,
//!     WalkOptions::new().each_before(|node, _ancestors| {
//!         let id = node["id"].as_i64().unwrap() * 2;
//!         Some(json!({ "id": id }))
//!     }),
//! );
//! assert_eq!(doubled, json!([{ "id": 2, "children": [{ "id": 4 }] }]));
//! ```
//!
//! Callbacks are infallible; a panicking callback unwinds through the walk
//! untouched. Cyclic input is out of scope and recurses without bound.

use serde_json::Value;

use crate::observability::messages::tree::WalkCompleted;
use crate::observability::messages::StructuredLog;

/// Default key under which a node's children array lives.
pub const DEFAULT_CHILDREN_KEY: &str = "children";

/// Post-order decision for a node, returned by `each_after`.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Keep the node as produced by the pre-order phase.
    Keep,
    /// Remove the node (and its subtree) from the output.
    Drop,
    /// Substitute a final replacement node.
    Replace(Value),
}

type BeforeFn<'a> = dyn FnMut(&Value, &[Value]) -> Option<Value> + 'a;
type AfterFn<'a> = dyn FnMut(&Value, &[Value]) -> Verdict + 'a;

/// Options for [`walk`]. Built fluently; all parts are optional.
#[derive(Default)]
pub struct WalkOptions<'a> {
    children_key: Option<String>,
    extra_children_insert_after: bool,
    each_before: Option<Box<BeforeFn<'a>>>,
    each_after: Option<Box<AfterFn<'a>>>,
}

impl<'a> WalkOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key holding a node's children array. Default `"children"`.
    pub fn children_key(mut self, key: impl Into<String>) -> Self {
        self.children_key = Some(key.into());
        self
    }

    /// Splice a replacement node's own children after the processed
    /// originals instead of before them. Default false.
    pub fn extra_children_insert_after(mut self, after: bool) -> Self {
        self.extra_children_insert_after = after;
        self
    }

    /// Pre-order callback; `Some(node)` swaps in a replacement.
    pub fn each_before<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Value, &[Value]) -> Option<Value> + 'a,
    {
        self.each_before = Some(Box::new(callback));
        self
    }

    /// Post-order callback deciding each node's fate.
    pub fn each_after<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Value, &[Value]) -> Verdict + 'a,
    {
        self.each_after = Some(Box::new(callback));
        self
    }
}

#[derive(Default)]
struct WalkStats {
    visited: usize,
    dropped: usize,
}

/// Walk a tree or forest depth-first, applying the configured callbacks.
///
/// A `Value::Array` input is treated as a forest and yields an array; any
/// other input is a single root and yields the single resulting node, or
/// `Value::Null` when that root was dropped by `each_after` (the one case
/// where the output shape cannot mirror the input).
pub fn walk(tree: &Value, mut opts: WalkOptions<'_>) -> Value {
    let children_key = opts
        .children_key
        .take()
        .unwrap_or_else(|| DEFAULT_CHILDREN_KEY.to_string());
    let mut stats = WalkStats::default();

    let result = match tree {
        Value::Array(nodes) => Value::Array(walk_nodes(
            nodes,
            &mut opts,
            &children_key,
            &[],
            &mut stats,
        )),
        node => walk_nodes(
            std::slice::from_ref(node),
            &mut opts,
            &children_key,
            &[],
            &mut stats,
        )
        .into_iter()
        .next()
        .unwrap_or(Value::Null),
    };

    WalkCompleted {
        visited: stats.visited,
        dropped: stats.dropped,
    }
    .log();

    result
}

fn walk_nodes(
    nodes: &[Value],
    opts: &mut WalkOptions<'_>,
    children_key: &str,
    ancestors: &[Value],
    stats: &mut WalkStats,
) -> Vec<Value> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        stats.visited += 1;

        let before = opts.each_before.as_mut().and_then(|f| f(node, ancestors));
        let replaced = before.is_some();
        let mut new_node = before.unwrap_or_else(|| node.clone());

        // Recursion is driven by the original node's children; a
        // replacement's own children are "extra" and spliced around the
        // processed originals.
        if let Some(children) = node.get(children_key).and_then(Value::as_array) {
            // The chain holds replacement nodes, captured before their
            // children are attached.
            let mut chain = ancestors.to_vec();
            chain.push(new_node.clone());

            let processed = walk_nodes(children, opts, children_key, &chain, stats);

            let extra: Vec<Value> = if replaced {
                new_node
                    .get(children_key)
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default()
            } else {
                Vec::new()
            };

            let merged: Vec<Value> = if opts.extra_children_insert_after {
                processed.into_iter().chain(extra).collect()
            } else {
                extra.into_iter().chain(processed).collect()
            };

            if let Value::Object(map) = &mut new_node {
                map.insert(children_key.to_string(), Value::Array(merged));
            }
        }

        let verdict = match opts.each_after.as_mut() {
            Some(f) => f(&new_node, ancestors),
            None => Verdict::Keep,
        };

        let final_node = match verdict {
            Verdict::Drop => {
                stats.dropped += 1;
                continue;
            }
            Verdict::Keep => new_node,
            Verdict::Replace(mut replacement) => {
                // A post-order replacement without children inherits the
                // subtree already computed on new_node.
                if replacement.get(children_key).is_none() {
                    if let Some(children) = new_node.get(children_key) {
                        if let Value::Object(map) = &mut replacement {
                            map.insert(children_key.to_string(), children.clone());
                        }
                    }
                }
                replacement
            }
        };

        out.push(final_node);
    }

    out
}
