// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! This module contains all message types used throughout canopy for
//! diagnostic and operational logging. Each message type implements the
//! `Display` trait to provide consistent, human-readable output while enabling
//! future internationalization.
//!
//! # Organization
//!
//! Messages are organized by subsystem to maintain Single Responsibility Principle:
//!
//! * `events` - channel dispatch lifecycle events
//! * `tree` - tree walk and tree build events
//!
//! # Usage Pattern
//!
//! ```rust
//! use canopy::observability::messages::tree::TreeBuilt;
//!
//! let msg = TreeBuilt {
//!     records: 12,
//!     roots: 3,
//! };
//!
//! tracing::debug!("{}", msg);
//! ```

use tracing::Span;

pub mod events;
pub mod tree;

/// Structured emission of a log message: a leveled event plus an optional span.
///
/// Implementors pair their `Display` text with the matching `tracing` fields
/// so call sites never hand-assemble field lists.
pub trait StructuredLog {
    /// Emit the message at its designated level with structured fields.
    fn log(&self);

    /// Create a span carrying the message's structured fields.
    fn span(&self, name: &str) -> Span;
}
