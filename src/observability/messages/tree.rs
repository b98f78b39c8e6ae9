// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for tree walk and tree build events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A depth-first walk finished over the given node counts.
///
/// # Log Level
/// `trace!` - Per-call diagnostic for a pure traversal
pub struct WalkCompleted {
    pub visited: usize,
    pub dropped: usize,
}

impl Display for WalkCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Tree walk visited {} node(s), dropped {}",
            self.visited, self.dropped
        )
    }
}

impl StructuredLog for WalkCompleted {
    fn log(&self) {
        tracing::trace!(
            visited = self.visited,
            dropped = self.dropped,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "walk",
            span_name = name,
            visited = self.visited,
            dropped = self.dropped,
        )
    }
}

/// Flat records were assembled into a nested tree.
///
/// # Log Level
/// `debug!` - One event per build
///
/// # Example
/// ```
/// use canopy::observability::messages::tree::TreeBuilt;
///
/// let msg = TreeBuilt { records: 12, roots: 3 };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct TreeBuilt {
    pub records: usize,
    pub roots: usize,
}

impl Display for TreeBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built tree from {} record(s) into {} root(s)",
            self.records, self.roots
        )
    }
}

impl StructuredLog for TreeBuilt {
    fn log(&self) {
        tracing::debug!(
            records = self.records,
            roots = self.roots,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "tree_build",
            span_name = name,
            records = self.records,
            roots = self.roots,
        )
    }
}
