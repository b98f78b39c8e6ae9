// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build a nested tree from flat parent-keyed records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::observability::messages::tree::TreeBuilt;
use crate::observability::messages::StructuredLog;

/// Options for [`list_to_tree`].
///
/// Serde defaults match the documented defaults, so a partial JSON record
/// deserializes into a fully resolved options value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListToTreeOptions {
    /// Field holding a record's own id. Default `"id"`.
    pub id_key: String,
    /// Field holding a record's parent id. Default `"pid"`.
    pub parent_key: String,
    /// Parent value marking a root record. Default `0`.
    pub root_value: Value,
    /// Field under which children are nested. Default `"children"`.
    pub children_key: String,
}

impl Default for ListToTreeOptions {
    fn default() -> Self {
        Self {
            id_key: "id".to_string(),
            parent_key: "pid".to_string(),
            root_value: Value::from(0),
            children_key: "children".to_string(),
        }
    }
}

/// Assemble flat records into a forest of nested nodes.
///
/// Records are grouped by parent key; the group matching `root_value`
/// forms the roots, and each record's own id pulls in its children
/// recursively. Records whose parent never appears (and is not the root
/// value) are dropped. Grouping compares stringified key values, so a
/// numeric `1` and a string `"1"` land in the same group.
///
/// ```rust
/// use canopy::tree::{list_to_tree, ListToTreeOptions};
/// use serde_json::json;
///
/// let list = vec![
///     json!({ "id": 1, "pid": 0 }),
///     json!({ "id": 2, "pid": 0 }),
///     json!({ "id": 3, "pid": 1 }),
/// ];
/// let tree = list_to_tree(&list, &ListToTreeOptions::default());
/// assert_eq!(tree, json!([
///     { "id": 1, "pid": 0, "children": [{ "id": 3, "pid": 1 }] },
///     { "id": 2, "pid": 0 }
/// ]));
/// ```
pub fn list_to_tree(list: &[Value], opts: &ListToTreeOptions) -> Value {
    let mut groups: HashMap<String, Vec<Value>> = HashMap::new();
    for record in list {
        let key = group_key(record.get(&opts.parent_key));
        groups.entry(key).or_default().push(record.clone());
    }

    let mut roots = groups
        .remove(&group_key(Some(&opts.root_value)))
        .unwrap_or_default();
    attach_children(&mut roots, &mut groups, opts);

    TreeBuilt {
        records: list.len(),
        roots: roots.len(),
    }
    .log();

    Value::Array(roots)
}

fn attach_children(
    nodes: &mut [Value],
    groups: &mut HashMap<String, Vec<Value>>,
    opts: &ListToTreeOptions,
) {
    for node in nodes {
        let key = group_key(node.get(&opts.id_key));
        if let Some(mut children) = groups.remove(&key) {
            attach_children(&mut children, groups, opts);
            if let Value::Object(map) = node {
                map.insert(opts.children_key.clone(), Value::Array(children));
            }
        }
    }
}

// Stringified grouping key: strings group by content, everything else by
// its JSON rendering, mirroring the original's string-keyed grouping.
fn group_key(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => Value::Null.to_string(),
    }
}
