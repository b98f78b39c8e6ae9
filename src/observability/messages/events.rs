// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for channel dispatch lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Channel emission and handler fan-out
//! * Short-circuited dispatch (a handler returned `false`)
//! * Handler failures during dispatch

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A channel emit started with the given handler fan-out.
///
/// # Log Level
/// `debug!` - High-frequency dispatch event
///
/// # Example
/// ```
/// use canopy::observability::messages::events::ChannelEmitted;
///
/// let msg = ChannelEmitted {
///     channel: "user:login",
///     handler_count: 3,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ChannelEmitted<'a> {
    pub channel: &'a str,
    pub handler_count: usize,
}

impl Display for ChannelEmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Emitting channel '{}' to {} handler(s)",
            self.channel, self.handler_count
        )
    }
}

impl StructuredLog for ChannelEmitted<'_> {
    fn log(&self) {
        tracing::debug!(
            channel = self.channel,
            handler_count = self.handler_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "emit",
            span_name = name,
            channel = self.channel,
            handler_count = self.handler_count,
        )
    }
}

/// Dispatch stopped early because a handler returned `false`.
///
/// # Log Level
/// `debug!` - Expected control-flow event under `false_break`
pub struct EmitInterrupted<'a> {
    pub channel: &'a str,
    /// Handlers that ran before (and including) the interrupting one
    pub handled: usize,
}

impl Display for EmitInterrupted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Channel '{}' dispatch interrupted after {} handler(s)",
            self.channel, self.handled
        )
    }
}

impl StructuredLog for EmitInterrupted<'_> {
    fn log(&self) {
        tracing::debug!(
            channel = self.channel,
            handled = self.handled,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "emit_interrupted",
            span_name = name,
            channel = self.channel,
            handled = self.handled,
        )
    }
}

/// A handler failed during dispatch; remaining handlers were skipped.
///
/// # Log Level
/// `error!` - Dispatch aborted, error surfaces to the emit caller
pub struct HandlerFailed<'a> {
    pub channel: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for HandlerFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Handler on channel '{}' failed: {}",
            self.channel, self.error
        )
    }
}

impl StructuredLog for HandlerFailed<'_> {
    fn log(&self) {
        tracing::error!(
            channel = self.channel,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "handler_failed",
            span_name = name,
            channel = self.channel,
            error = %self.error,
        )
    }
}
