// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Named-channel publish/subscribe primitives.
//!
//! The core is [`EventDispatcher`], a synchronous dispatcher with priority
//! ordering, short-circuiting, and value-chaining modes. Two thin wrappers
//! build on it: [`EventChain`] (a single chained channel driven through
//! `then`) and [`EventOne`] (a single channel carrying exactly one value
//! per emit).

use std::sync::atomic::{AtomicU64, Ordering};

pub mod chain;
pub mod dispatcher;
pub mod one;

pub use chain::EventChain;
pub use dispatcher::{
    DispatcherOptions, EmitContext, EventDispatcher, Handler, HandlerResult, HandlerToken,
};
pub use one::EventOne;

static NEXT_CHANNEL: AtomicU64 = AtomicU64::new(1);

/// Generate a process-unique channel name with the given prefix.
///
/// Used by the wrappers to claim a private channel on their internal
/// dispatcher without colliding with any caller-chosen name.
pub(crate) fn unique_channel(prefix: &str) -> String {
    format!("{}#{}", prefix, NEXT_CHANNEL.fetch_add(1, Ordering::Relaxed))
}
