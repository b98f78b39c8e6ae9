// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Tree transform engine: build, walk, and reshape trees of JSON nodes.
//!
//! Everything here is a pure function over its input; no call shares
//! state with another. The traversal core is [`walk()`]; [`find_path`],
//! [`flatten`], and [`filter`] are thin derivations over it, and
//! [`list_to_tree`] builds nested trees from flat parent-keyed records.

pub mod builder;
pub mod extract;
pub mod ops;
pub mod walk;

pub use builder::{list_to_tree, ListToTreeOptions};
pub use extract::{value_slice, Extract};
pub use ops::{filter, find_path, flatten};
pub use walk::{walk, Verdict, WalkOptions, DEFAULT_CHILDREN_KEY};
