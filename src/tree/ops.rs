// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Derived tree operations built on [`walk`]: path-finding, flattening,
//! and filtering.

use serde_json::Value;

use crate::tree::extract::Extract;
use crate::tree::walk::{walk, Verdict, WalkOptions};

/// Find the root-to-node path of the node matching `predicate`.
///
/// Runs a full walk; when several nodes match, the last match in
/// pre-order wins. The traversal is deliberately not short-circuited on
/// the first match so that callers relying on last-match semantics keep
/// working; the cost is one full pass either way.
///
/// The returned path lists every ancestor from the root down to the
/// matching node inclusive, each projected through `extract`. No match
/// yields an empty vec.
///
/// ```rust
/// use canopy::tree::{find_path, Extract};
/// use serde_json::json;
///
/// let tree = json!([{ "id": 1, "children": [{ "id": 5 }] }]);
/// let path = find_path(&tree, |node, _| node["id"] == json!(5), Extract::fields("id"));
/// assert_eq!(path, vec![json!({ "id": 1 }), json!({ "id": 5 })]);
/// ```
pub fn find_path<F>(tree: &Value, mut predicate: F, extract: Extract<'_>) -> Vec<Value>
where
    F: FnMut(&Value, &[Value]) -> bool,
{
    let mut path = Vec::new();
    walk(
        tree,
        WalkOptions::new().each_before(|node, ancestors| {
            if predicate(node, ancestors) {
                path = ancestors
                    .iter()
                    .chain(std::iter::once(node))
                    .map(|n| extract.apply(n))
                    .collect();
            }
            None
        }),
    );
    path
}

/// Flatten a tree or forest into a list in pre-order visitation order,
/// each node projected through `extract`.
pub fn flatten(tree: &Value, extract: Extract<'_>) -> Vec<Value> {
    let mut list = Vec::new();
    walk(
        tree,
        WalkOptions::new().each_before(|node, _| {
            list.push(extract.apply(node));
            None
        }),
    );
    list
}

/// Remove every node for which `predicate` returns false.
///
/// A dropped node takes its whole subtree with it; surviving siblings
/// keep their relative order. A parent whose children were all dropped
/// keeps an empty children array.
pub fn filter<F>(tree: &Value, mut predicate: F) -> Value
where
    F: FnMut(&Value, &[Value]) -> bool,
{
    walk(
        tree,
        WalkOptions::new().each_after(move |node, ancestors| {
            if predicate(node, ancestors) {
                Verdict::Keep
            } else {
                Verdict::Drop
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tree() -> Value {
        json!([
            {
                "id": 1,
                "pid": 0,
                "name": "one",
                "children": [{ "id": 3, "pid": 1, "name": "three" }]
            },
            { "id": 2, "pid": 0, "name": "two" }
        ])
    }

    fn deep_tree() -> Value {
        json!([
            {
                "id": 1,
                "name": "node1",
                "children": [
                    {
                        "id": 3,
                        "name": "node3",
                        "children": [
                            {
                                "id": 5,
                                "name": "node5",
                                "children": [
                                    { "id": 6, "name": "node6" },
                                    { "id": 7, "name": "node7" }
                                ]
                            }
                        ]
                    },
                    { "id": 4, "name": "node4" }
                ]
            },
            {
                "id": 2,
                "name": "node2",
                "children": [{ "id": 8 }]
            }
        ])
    }

    #[test]
    fn test_find_path_to_root_node() {
        let path = find_path(&deep_tree(), |node, _| node["id"] == json!(1), Extract::fields("id"));
        assert_eq!(path, vec![json!({ "id": 1 })]);
    }

    #[test]
    fn test_find_path_projects_each_ancestor() {
        let path = find_path(
            &deep_tree(),
            |node, _| node["id"] == json!(5),
            Extract::fields("id,name"),
        );
        assert_eq!(
            path,
            vec![
                json!({ "id": 1, "name": "node1" }),
                json!({ "id": 3, "name": "node3" }),
                json!({ "id": 5, "name": "node5" })
            ]
        );
    }

    #[test]
    fn test_find_path_four_levels_deep_root_to_leaf_order() {
        let path = find_path(&deep_tree(), |node, _| node["id"] == json!(7), Extract::fields("id"));
        assert_eq!(
            path,
            vec![
                json!({ "id": 1 }),
                json!({ "id": 3 }),
                json!({ "id": 5 }),
                json!({ "id": 7 })
            ]
        );
    }

    #[test]
    fn test_find_path_without_match_is_empty() {
        let path = find_path(&deep_tree(), |node, _| node["id"] == json!(99), Extract::Identity);
        assert!(path.is_empty());
    }

    #[test]
    fn test_find_path_last_match_wins() {
        // Nodes 6 and 7 both match; the later pre-order match wins.
        let path = find_path(
            &deep_tree(),
            |node, _| node["id"] == json!(6) || node["id"] == json!(7),
            Extract::fields("id"),
        );
        assert_eq!(path.last(), Some(&json!({ "id": 7 })));
    }

    #[test]
    fn test_find_path_predicate_sees_ancestors() {
        let path = find_path(
            &deep_tree(),
            |node, ancestors| node["id"] == json!(8) && ancestors.len() == 1,
            Extract::fields("id"),
        );
        assert_eq!(path, vec![json!({ "id": 2 }), json!({ "id": 8 })]);
    }

    #[test]
    fn test_flatten_identity_preserves_pre_order() {
        let list = flatten(&sample_tree(), Extract::Identity);
        assert_eq!(
            list,
            vec![
                json!({ "id": 1, "pid": 0, "name": "one", "children": [{ "id": 3, "pid": 1, "name": "three" }] }),
                json!({ "id": 3, "pid": 1, "name": "three" }),
                json!({ "id": 2, "pid": 0, "name": "two" })
            ]
        );
    }

    #[test]
    fn test_flatten_with_field_projection() {
        let list = flatten(&sample_tree(), Extract::fields("id"));
        assert_eq!(
            list,
            vec![json!({ "id": 1 }), json!({ "id": 3 }), json!({ "id": 2 })]
        );
    }

    #[test]
    fn test_flatten_with_func_extractor() {
        let list = flatten(&sample_tree(), Extract::func(|node| node["id"].clone()));
        assert_eq!(list, vec![json!(1), json!(3), json!(2)]);
    }

    #[test]
    fn test_filter_keeps_emptied_children_array() {
        let result = filter(&sample_tree(), |node, _| node["id"] != json!(3));
        assert_eq!(
            result,
            json!([
                { "id": 1, "pid": 0, "name": "one", "children": [] },
                { "id": 2, "pid": 0, "name": "two" }
            ])
        );
    }

    #[test]
    fn test_filter_drops_subtree_with_its_parent() {
        let result = filter(&sample_tree(), |node, _| node["id"] != json!(1));
        assert_eq!(result, json!([{ "id": 2, "pid": 0, "name": "two" }]));
    }

    #[test]
    fn test_filter_survivor_with_pruned_children() {
        let result = filter(&sample_tree(), |node, _| node["id"] == json!(1));
        assert_eq!(
            result,
            json!([{ "id": 1, "pid": 0, "name": "one", "children": [] }])
        );
    }

    #[test]
    fn test_filter_surviving_child_of_dropped_parent_is_gone() {
        // Node 3 passes the predicate but rides out with its parent.
        let result = filter(&sample_tree(), |node, _| {
            node["id"] == json!(3) || node["id"] == json!(2)
        });
        assert_eq!(result, json!([{ "id": 2, "pid": 0, "name": "two" }]));
    }

    #[test]
    fn test_filter_preserves_sibling_order() {
        let forest = json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }, { "id": 4 }]);
        let result = filter(&forest, |node, _| node["id"] != json!(2));
        assert_eq!(result, json!([{ "id": 1 }, { "id": 3 }, { "id": 4 }]));
    }
}
