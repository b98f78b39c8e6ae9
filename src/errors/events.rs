// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors surfaced by the event dispatcher.
///
/// The dispatcher itself never fails under normal use; the only error path
/// is a handler returning `Err` during `emit`, which aborts the remaining
/// handlers for that call and is surfaced to the caller unchanged.
#[derive(Debug, Error)]
pub enum EventError {
    /// A subscribed handler failed while the channel was being emitted.
    #[error("handler on channel '{channel}' failed: {source}")]
    HandlerFailed {
        /// The channel that was being emitted
        channel: String,
        /// The error produced by the handler
        #[source]
        source: anyhow::Error,
    },
}
