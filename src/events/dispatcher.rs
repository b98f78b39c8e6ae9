// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Named-channel event dispatcher with priority ordering, short-circuiting,
//! and value-chaining modes.
//!
//! A dispatcher owns a mapping from channel name to an ordered subscription
//! list. Channels are created lazily on first subscription. At each emit the
//! run order is recomputed: priority subscriptions first (in insertion
//! order), then non-priority subscriptions (in insertion order).
//!
//! Handlers are identified by a [`HandlerToken`] minted when the [`Handler`]
//! is constructed. Cloning a `Handler` preserves its token, so the clone
//! counts as "the same handler" for deduplication and removal. Rust closures
//! cannot be compared by reference, so the token stands in for the original
//! reference-identity contract.
//!
//! # Dispatch modes
//!
//! * `false_break` (default on): a handler returning exactly `false` stops
//!   the remaining handlers for that emit.
//! * `chained`: each handler receives the previous handler's return value
//!   as its sole argument; the first handler receives the original args.
//! * `prevent_repeat` (default on): subscribing a handler already present
//!   on a channel is a no-op.
//!
//! # Example
//!
//! ```rust
//! use canopy::events::{EventDispatcher, Handler};
//! use serde_json::{json, Value};
//!
//! let mut bus = EventDispatcher::new();
//! let greet = Handler::new(|_cx, args| {
//!     Ok(json!(format!("hello {}", args[0].as_str().unwrap_or("world"))))
//! });
//! bus.on("greet", greet, true);
//! bus.emit("greet", &[json!("canopy")]).unwrap();
//! ```
//!
//! # Reentrancy
//!
//! The run order is snapshotted before the first handler executes, and the
//! borrow rules keep handlers from mutating the dispatcher mid-emit. A
//! handler that needs to change subscriptions must defer that work until
//! `emit` returns.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::EventError;
use crate::observability::messages::events::{ChannelEmitted, EmitInterrupted, HandlerFailed};
use crate::observability::messages::StructuredLog;

/// Result of a single handler invocation.
///
/// The returned `Value` feeds chained mode and the `false_break` check;
/// handlers with nothing to report return `Ok(Value::Null)`.
pub type HandlerResult = anyhow::Result<Value>;

type HandlerFn = dyn Fn(&EmitContext<'_>, &[Value]) -> HandlerResult;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Handler`].
///
/// Two `Handler` values compare as "the same subscription" exactly when
/// their tokens are equal, which happens only through cloning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerToken(u64);

impl HandlerToken {
    fn next() -> Self {
        HandlerToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// A subscribable callback with stable identity.
#[derive(Clone)]
pub struct Handler {
    token: HandlerToken,
    func: Rc<HandlerFn>,
}

impl Handler {
    /// Wrap a closure, minting a fresh identity token for it.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&EmitContext<'_>, &[Value]) -> HandlerResult + 'static,
    {
        Self {
            token: HandlerToken::next(),
            func: Rc::new(func),
        }
    }

    /// The identity token used for deduplication and removal.
    pub fn token(&self) -> HandlerToken {
        self.token
    }

    pub(crate) fn call(&self, cx: &EmitContext<'_>, args: &[Value]) -> HandlerResult {
        (self.func)(cx, args)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("token", &self.token).finish()
    }
}

/// Per-invocation context passed to every handler.
///
/// Carries the channel being emitted and the dispatcher's configured context
/// value. When no context value is configured the handler sees `None`; a
/// borrow-checked language cannot hand a stored closure the dispatcher
/// itself the way the dynamic original did.
pub struct EmitContext<'a> {
    channel: &'a str,
    context: Option<&'a Value>,
}

impl<'a> EmitContext<'a> {
    /// Name of the channel being emitted.
    pub fn channel(&self) -> &str {
        self.channel
    }

    /// The configured context value, if any.
    pub fn context(&self) -> Option<&Value> {
        self.context
    }
}

/// Immutable dispatcher configuration, set at construction.
///
/// Serde defaults match the documented option defaults, so a partial JSON
/// record (`{"chained": true}`) deserializes into a fully resolved options
/// value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherOptions {
    /// Each handler receives the previous handler's return value as its
    /// sole argument. Default false.
    pub chained: bool,
    /// A handler returning exactly `false` stops the remaining handlers.
    /// Default true.
    pub false_break: bool,
    /// Subscribing a handler already present on a channel is a no-op.
    /// Default true.
    pub prevent_repeat: bool,
    /// Context value exposed to handlers through [`EmitContext::context`].
    pub context: Option<Value>,
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self {
            chained: false,
            false_break: true,
            prevent_repeat: true,
            context: None,
        }
    }
}

struct Subscription {
    handler: Handler,
    priority: bool,
}

type Monitor = Box<dyn Fn(&str, &[Value])>;

/// Named-channel publish/subscribe dispatcher.
///
/// See the [module docs](self) for dispatch semantics. The dispatcher is
/// single-threaded by design; handlers run synchronously on the emitting
/// call stack.
pub struct EventDispatcher {
    channels: HashMap<String, Vec<Subscription>>,
    options: DispatcherOptions,
    monitor: Option<Monitor>,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("channels", &self.channels.keys().collect::<Vec<_>>())
            .field("options", &self.options)
            .field("monitor", &self.monitor.is_some())
            .finish()
    }
}

impl EventDispatcher {
    /// Dispatcher with default options.
    pub fn new() -> Self {
        Self::with_options(DispatcherOptions::default())
    }

    /// Dispatcher with explicit options.
    pub fn with_options(options: DispatcherOptions) -> Self {
        Self {
            channels: HashMap::new(),
            options,
            monitor: None,
        }
    }

    /// Attach an observer invoked once per emit, after the handlers, with
    /// the channel name and the original emit arguments (never the chained
    /// intermediate values).
    pub fn with_monitor<F>(mut self, monitor: F) -> Self
    where
        F: Fn(&str, &[Value]) + 'static,
    {
        self.monitor = Some(Box::new(monitor));
        self
    }

    /// Subscribe `handler` to `channel`.
    ///
    /// Priority subscriptions run before non-priority subscriptions at each
    /// emit, each group in insertion order. With `prevent_repeat` (default)
    /// a handler already present on the channel is not added again.
    pub fn on(&mut self, channel: &str, handler: Handler, priority: bool) -> &mut Self {
        let subscriptions = self.channels.entry(channel.to_string()).or_default();
        let present = self.options.prevent_repeat
            && subscriptions.iter().any(|s| s.handler.token == handler.token);
        if !present {
            subscriptions.push(Subscription { handler, priority });
        }
        self
    }

    /// Subscribe every `(channel, handler)` entry of `map`, all with the
    /// same priority flag. Deduplication applies per entry, as in [`on`].
    ///
    /// [`on`]: EventDispatcher::on
    pub fn on_map<I>(&mut self, map: I, priority: bool) -> &mut Self
    where
        I: IntoIterator<Item = (String, Handler)>,
    {
        for (channel, handler) in map {
            self.on(&channel, handler, priority);
        }
        self
    }

    /// Remove the subscription matching `token` from `channel`, if present.
    pub fn off(&mut self, channel: &str, token: HandlerToken) -> &mut Self {
        if let Some(subscriptions) = self.channels.get_mut(channel) {
            if let Some(index) = subscriptions
                .iter()
                .position(|s| s.handler.token == token)
            {
                subscriptions.remove(index);
            }
        }
        self
    }

    /// Clear every subscription on `channel`.
    ///
    /// The channel entry itself stays behind (empty), so
    /// [`has_channel`](EventDispatcher::has_channel) keeps reporting `true`
    /// for it afterwards.
    pub fn off_channel(&mut self, channel: &str) -> &mut Self {
        self.channels.insert(channel.to_string(), Vec::new());
        self
    }

    /// Whether `channel` has a subscription list entry.
    ///
    /// True for any channel that was ever subscribed to, including one
    /// emptied by [`off_channel`](EventDispatcher::off_channel) — an empty
    /// list is still "present". A channel never touched reports false.
    pub fn has_channel(&self, channel: &str) -> bool {
        self.channels.contains_key(channel)
    }

    /// Emit `channel` with `args`, running its subscriptions in
    /// priority-then-insertion order.
    ///
    /// A handler `Err` aborts the remaining handlers and surfaces as
    /// [`EventError::HandlerFailed`]. Emitting a channel with no
    /// subscriptions still notifies the monitor.
    pub fn emit(&self, channel: &str, args: &[Value]) -> Result<&Self, EventError> {
        // Run order is recomputed per emit: priority first, then the rest,
        // each group in insertion order.
        let ordered: Vec<Handler> = self
            .channels
            .get(channel)
            .map(|subs| {
                subs.iter()
                    .filter(|s| s.priority)
                    .chain(subs.iter().filter(|s| !s.priority))
                    .map(|s| s.handler.clone())
                    .collect()
            })
            .unwrap_or_default();

        ChannelEmitted {
            channel,
            handler_count: ordered.len(),
        }
        .log();

        let cx = EmitContext {
            channel,
            context: self.options.context.as_ref(),
        };

        let mut last_args: Vec<Value> = args.to_vec();
        for (index, handler) in ordered.iter().enumerate() {
            let ret = match handler.call(&cx, &last_args) {
                Ok(ret) => ret,
                Err(source) => {
                    HandlerFailed {
                        channel,
                        error: &*source,
                    }
                    .log();
                    return Err(EventError::HandlerFailed {
                        channel: channel.to_string(),
                        source,
                    });
                }
            };

            let interrupted = self.options.false_break && ret == Value::Bool(false);
            if self.options.chained {
                last_args = vec![ret];
            }
            if interrupted {
                EmitInterrupted {
                    channel,
                    handled: index + 1,
                }
                .log();
                break;
            }
        }

        // The monitor always sees the original args, never chained values.
        if let Some(monitor) = &self.monitor {
            monitor(channel, args);
        }

        Ok(self)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
