// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node extractors: how `find_path` and `flatten` project each node.
//!
//! The original contract allowed a field name, a comma-separated field
//! list, or a callback; anything else was a programmer error. The enum
//! makes the malformed case unrepresentable.

use serde_json::{Map, Value};

type ExtractFn<'a> = dyn Fn(&Value) -> Value + 'a;

/// Projection applied to each node on a recorded path or flattened list.
pub enum Extract<'a> {
    /// The whole node, cloned.
    Identity,
    /// An object holding only the named fields (absent fields skipped).
    Fields(Vec<String>),
    /// An arbitrary projection function.
    Func(Box<ExtractFn<'a>>),
}

impl<'a> Extract<'a> {
    /// Field projection from a spec like `"id"` or `"id,name"`.
    pub fn fields(spec: &str) -> Self {
        Extract::Fields(spec.split(',').map(|s| s.trim().to_string()).collect())
    }

    /// Projection through an arbitrary function.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + 'a,
    {
        Extract::Func(Box::new(f))
    }

    pub(crate) fn apply(&self, node: &Value) -> Value {
        match self {
            Extract::Identity => node.clone(),
            Extract::Fields(keys) => value_slice(node, keys),
            Extract::Func(f) => f(node),
        }
    }
}

impl Default for Extract<'_> {
    fn default() -> Self {
        Extract::Identity
    }
}

impl<'a> From<&str> for Extract<'a> {
    fn from(spec: &str) -> Self {
        Extract::fields(spec)
    }
}

/// New object holding only `keys` of `value`; non-objects and absent
/// fields yield an empty object.
pub fn value_slice(value: &Value, keys: &[String]) -> Value {
    let mut out = Map::new();
    if let Value::Object(map) = value {
        for key in keys {
            if let Some(v) = map.get(key) {
                out.insert(key.clone(), v.clone());
            }
        }
    }
    Value::Object(out)
}
